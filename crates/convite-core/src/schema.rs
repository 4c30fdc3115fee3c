//! Wire-schema coercion between raw remote rows and guest records.
//!
//! The remote table is one worksheet per event with a header row and the six
//! canonical columns. Intake never fails: absent cells default, numeric cells
//! become text, unknown columns (including spreadsheet export artifacts like
//! `Unnamed: 0`) are dropped and never written back.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::record::{Attendance, Category, GuestId, GuestRecord};

/// Canonical column names, in persistence order.
pub const COLUMNS: [&str; 6] = ["ID", "Mesa", "Nombre", "Categoria", "Observaciones", "Asistio"];

pub const COL_ID: &str = "ID";
pub const COL_TABLE: &str = "Mesa";
pub const COL_NAME: &str = "Nombre";
pub const COL_CATEGORY: &str = "Categoria";
pub const COL_NOTES: &str = "Observaciones";
pub const COL_ATTENDED: &str = "Asistio";

/// One raw row as the gateway hands it over: column name to cell value.
/// Cells may be absent, empty, text, or numeric depending on how the remote
/// service chose to type them.
pub type RawRow = BTreeMap<String, Value>;

/// Coerce a raw row into a record. Never fails; missing or malformed cells
/// degrade to defaults.
pub fn coerce(row: &RawRow) -> GuestRecord {
    GuestRecord {
        id: GuestId::from_wire(&cell_text(row, COL_ID)),
        table_number: cell_text(row, COL_TABLE),
        name: cell_text(row, COL_NAME),
        category: Category::from_wire(&cell_text(row, COL_CATEGORY)),
        notes: cell_text(row, COL_NOTES),
        attended: coerce_attended(row),
    }
}

/// Build the persistence row for a record: exactly the six canonical columns.
pub fn to_row(record: &GuestRecord) -> RawRow {
    let mut row = RawRow::new();
    row.insert(COL_ID.into(), Value::String(record.id.as_str().into()));
    row.insert(COL_TABLE.into(), Value::String(record.table_number.clone()));
    row.insert(COL_NAME.into(), Value::String(record.name.clone()));
    row.insert(COL_CATEGORY.into(), Value::String(record.category.as_wire().into()));
    row.insert(COL_NOTES.into(), Value::String(record.notes.clone()));
    row.insert(COL_ATTENDED.into(), Value::String(record.attended.as_wire().into()));
    row
}

fn coerce_attended(row: &RawRow) -> Attendance {
    // An absent column defaults to NO, same as an empty cell.
    Attendance::from_wire(&cell_text(row, COL_ATTENDED))
}

/// Text form of a cell: strings pass through, numbers render without a
/// trailing `.0` for whole values, everything else collapses to "".
fn cell_text(row: &RawRow, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => (f as i64).to_string(),
                    _ => n.to_string(),
                }
            }
        }
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
