//! Guest record model.
//!
//! Records mirror one row of the remote table. Everything is stored as text
//! the way the remote keeps it; typed views (category, attendance, numeric
//! table) are derived leniently and never fail on dirty remote data.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Short opaque guest identifier: 6 upper-case hex characters.
///
/// Unique within one event's list with overwhelming probability
/// (24 bits of entropy over tens to low hundreds of records).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(String);

impl GuestId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        GuestId(hex[..6].to_uppercase())
    }

    /// Wrap an id as it appears in the remote table.
    pub fn from_wire(raw: &str) -> Self {
        GuestId(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Guest age bracket.
///
/// The four recognized brackets use the remote table's Spanish labels on the
/// wire. Anything else read from the remote is preserved as `Other` so it
/// round-trips for display, but it never lands in an aggregate bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Major,
    Teen,
    Minor,
    Infant,
    /// Unrecognized label carried through unchanged.
    Other(String),
}

impl Category {
    /// The four bracket labels in display order.
    pub const WIRE_LABELS: [&'static str; 4] = ["MAYOR", "ADOLESCENTE", "MENOR", "BEBÉ"];

    /// Parse a wire label. Empty input falls back to the default bracket;
    /// unrecognized non-empty input is preserved as `Other`.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "" => Category::Major,
            "MAYOR" => Category::Major,
            "ADOLESCENTE" => Category::Teen,
            "MENOR" => Category::Minor,
            "BEBÉ" => Category::Infant,
            other => Category::Other(other.to_string()),
        }
    }

    /// The label written back to the remote table.
    pub fn as_wire(&self) -> &str {
        match self {
            Category::Major => "MAYOR",
            Category::Teen => "ADOLESCENTE",
            Category::Minor => "MENOR",
            Category::Infant => "BEBÉ",
            Category::Other(s) => s,
        }
    }

    /// Whether this value counts toward one of the four aggregate buckets.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Major
    }
}

/// Whether the guest showed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attendance {
    Yes,
    No,
}

impl Attendance {
    /// Lenient wire parse: affirmative labels mean yes, everything else no.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "SI" | "SÍ" | "YES" => Attendance::Yes,
            _ => Attendance::No,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Attendance::Yes => "SI",
            Attendance::No => "NO",
        }
    }
}

impl Default for Attendance {
    fn default() -> Self {
        Attendance::No
    }
}

/// One entry in a guest list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub id: GuestId,
    /// Seating-group label as stored; "0" (or anything unparseable) means
    /// unassigned. Kept as text because the remote column is text.
    pub table_number: String,
    /// Guest name, upper-cased.
    pub name: String,
    pub category: Category,
    /// Free-form notes, upper-cased, may be empty.
    pub notes: String,
    pub attended: Attendance,
}

impl GuestRecord {
    /// Numeric projection of the table label used for grouping and counting.
    ///
    /// Accepts plain integers and integer-valued floats; empty, non-numeric,
    /// and negative labels all collapse to 0 (unassigned).
    pub fn table_number_normalized(&self) -> u32 {
        parse_table_number(&self.table_number)
    }
}

pub(crate) fn parse_table_number(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return n.try_into().unwrap_or(0);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => f.trunc() as u32,
        _ => 0,
    }
}
