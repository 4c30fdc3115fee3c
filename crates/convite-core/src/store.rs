//! The in-memory working copy of one event's guest list.
//!
//! The store is the single writer: every mutation goes through it, and it
//! decides when the working copy is pushed back to the remote table. Adds and
//! deletes flush immediately; field edits accumulate until the next flush
//! (typically an explicit save). The remote copy is authoritative only
//! between sessions — within a session the store is.

use std::collections::BTreeSet;

use crate::gateway::{TableGateway, Unavailable};
use crate::record::{parse_table_number, Attendance, Category, GuestId, GuestRecord};
use crate::schema::{coerce, to_row, RawRow};
use crate::session::EventName;

/// Errors surfaced by store operations. None of them end a session.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The remote table could not be reached; in-memory state is unchanged
    /// and the save did not take effect.
    #[error(transparent)]
    RemoteUnavailable(#[from] Unavailable),

    /// `add` requires a non-empty guest name; the list was left unchanged.
    #[error("guest name must not be empty")]
    EmptyName,

    /// No record with this id exists in the list.
    #[error("no guest with id {0}")]
    NotFound(GuestId),

    /// The initial fetch was unavailable and nothing has been added since;
    /// overwriting the remote table with an empty list would destroy data
    /// the store never saw.
    #[error("refusing to overwrite the remote table with an empty unloaded list")]
    StaleEmptyOverwrite,
}

/// Whether a structural operation reached the remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistState {
    /// The flush completed; remote and local agree.
    Saved,
    /// The remote was unavailable; the change is held locally until the next
    /// successful flush.
    Pending,
}

/// Which record field an inline edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Table,
    Name,
    Category,
    Notes,
    Attended,
}

/// Input for `add`: everything the operator types. Id and attendance are
/// assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewGuest {
    pub table_number: String,
    pub name: String,
    pub category: Category,
    pub notes: String,
}

/// Aggregate counts over the current in-memory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregates {
    pub total: usize,
    /// Distinct assigned tables; table 0 (unassigned) is excluded.
    pub tables: usize,
    pub major: usize,
    pub teen: usize,
    pub minor: usize,
    pub infant: usize,
}

/// Authoritative working copy for one event.
#[derive(Debug)]
pub struct GuestListStore {
    event: EventName,
    records: Vec<GuestRecord>,
    /// Edits accumulated since the last successful flush.
    dirty: bool,
    /// The seeding fetch reported unavailable; the empty list is a stand-in,
    /// not a faithful copy of the remote.
    degraded: bool,
}

impl GuestListStore {
    /// Load the working copy for an event. An unavailable remote yields an
    /// empty but usable store; the caller renders it like an empty dataset.
    pub fn load(event: EventName, gateway: &dyn TableGateway) -> Self {
        match gateway.fetch_all(&event) {
            Ok(rows) => GuestListStore {
                event,
                records: rows.iter().map(coerce).collect(),
                dirty: false,
                degraded: false,
            },
            Err(_) => GuestListStore {
                event,
                records: Vec::new(),
                dirty: false,
                degraded: true,
            },
        }
    }

    pub fn event(&self) -> &EventName {
        &self.event
    }

    /// Current records in insertion order.
    pub fn records(&self) -> &[GuestRecord] {
        &self.records
    }

    pub fn get(&self, id: &GuestId) -> Option<&GuestRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Whether edits are waiting for a flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the seeding fetch failed and no flush has succeeded since.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Append a new guest and flush. Rejects an empty (post-trim) name with
    /// the list unchanged. Returns the fresh id and whether the flush
    /// reached the remote.
    pub fn add(
        &mut self,
        gateway: &dyn TableGateway,
        new: NewGuest,
    ) -> Result<(GuestId, PersistState), StoreError> {
        let name = new.name.trim().to_uppercase();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let id = self.fresh_id();
        self.records.push(GuestRecord {
            id: id.clone(),
            // Canonical integer label, same as the entry form's coercion.
            table_number: parse_table_number(&new.table_number).to_string(),
            name,
            category: new.category,
            notes: new.notes.trim().to_uppercase(),
            attended: Attendance::No,
        });
        Ok((id, self.flush_after_change(gateway)))
    }

    /// Update a single field of one record in place. Does not flush; the
    /// change rides along with the next flush.
    pub fn edit(&mut self, id: &GuestId, field: EditField, value: &str) -> Result<(), StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        match field {
            EditField::Table => record.table_number = value.trim().to_string(),
            EditField::Name => record.name = value.trim().to_uppercase(),
            EditField::Category => record.category = Category::from_wire(value),
            EditField::Notes => record.notes = value.trim().to_uppercase(),
            EditField::Attended => record.attended = Attendance::from_wire(value),
        }
        self.dirty = true;
        Ok(())
    }

    /// Remove a record and flush.
    pub fn delete(
        &mut self,
        gateway: &dyn TableGateway,
        id: &GuestId,
    ) -> Result<PersistState, StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.records.remove(index);
        Ok(self.flush_after_change(gateway))
    }

    /// Push the full current list, including unflushed edits, to the remote.
    ///
    /// On failure the in-memory state is untouched and stays flushable; the
    /// next flush carries everything accumulated in the meantime.
    pub fn flush(&mut self, gateway: &dyn TableGateway) -> Result<(), StoreError> {
        if self.degraded && self.records.is_empty() {
            return Err(StoreError::StaleEmptyOverwrite);
        }
        let rows: Vec<RawRow> = self.records.iter().map(to_row).collect();
        gateway.replace_all(&self.event, &rows)?;
        self.dirty = false;
        self.degraded = false;
        Ok(())
    }

    /// Recompute aggregate counts over the in-memory list. O(n), fresh on
    /// every call; unrecognized categories count in `total` only.
    pub fn aggregates(&self) -> Aggregates {
        let mut agg = Aggregates {
            total: self.records.len(),
            ..Aggregates::default()
        };
        let mut tables = BTreeSet::new();
        for record in &self.records {
            let table = record.table_number_normalized();
            if table != 0 {
                tables.insert(table);
            }
            match record.category {
                Category::Major => agg.major += 1,
                Category::Teen => agg.teen += 1,
                Category::Minor => agg.minor += 1,
                Category::Infant => agg.infant += 1,
                Category::Other(_) => {}
            }
        }
        agg.tables = tables.len();
        agg
    }

    fn flush_after_change(&mut self, gateway: &dyn TableGateway) -> PersistState {
        match self.flush(gateway) {
            Ok(()) => PersistState::Saved,
            Err(_) => PersistState::Pending,
        }
    }

    fn fresh_id(&self) -> GuestId {
        loop {
            let id = GuestId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;
    use serde_json::json;

    fn event() -> EventName {
        EventName::from_param(Some("Boda_Prueba"))
    }

    fn seeded_gateway(rows: Vec<RawRow>) -> MemoryGateway {
        let gw = MemoryGateway::new();
        gw.seed(&event(), rows);
        gw
    }

    fn raw(table: &str, name: &str, category: &str) -> RawRow {
        let mut row = RawRow::new();
        row.insert("ID".into(), json!("ABCDEF"));
        row.insert("Mesa".into(), json!(table));
        row.insert("Nombre".into(), json!(name));
        row.insert("Categoria".into(), json!(category));
        row
    }

    #[test]
    fn load_from_unavailable_remote_is_empty_but_ready() {
        let gw = MemoryGateway::new();
        gw.set_offline(true);
        let store = GuestListStore::load(event(), &gw);
        assert!(store.records().is_empty());
        assert!(store.is_degraded());
        assert_eq!(store.aggregates().total, 0);
    }

    #[test]
    fn add_assigns_id_and_persists() {
        let gw = seeded_gateway(vec![]);
        let mut store = GuestListStore::load(event(), &gw);
        let (id, persisted) = store
            .add(
                &gw,
                NewGuest {
                    table_number: "5".into(),
                    name: "juan perez".into(),
                    category: Category::Major,
                    notes: "sin gluten".into(),
                },
            )
            .unwrap();
        assert_eq!(persisted, PersistState::Saved);
        let record = store.get(&id).unwrap();
        assert_eq!(record.name, "JUAN PEREZ");
        assert_eq!(record.notes, "SIN GLUTEN");
        assert_eq!(record.attended, Attendance::No);
        // Remote copy reflects the add.
        assert_eq!(gw.stored(&event()).unwrap().len(), 1);
    }

    #[test]
    fn add_rejects_empty_name() {
        let gw = seeded_gateway(vec![]);
        let mut store = GuestListStore::load(event(), &gw);
        let err = store.add(&gw, NewGuest { name: "   ".into(), ..NewGuest::default() });
        assert!(matches!(err, Err(StoreError::EmptyName)));
        assert!(store.records().is_empty());
    }

    #[test]
    fn add_canonicalizes_table_label() {
        let gw = seeded_gateway(vec![]);
        let mut store = GuestListStore::load(event(), &gw);
        let (id, _) = store
            .add(&gw, NewGuest { name: "ana".into(), table_number: " 07 ".into(), ..NewGuest::default() })
            .unwrap();
        assert_eq!(store.get(&id).unwrap().table_number, "7");
    }

    #[test]
    fn edit_updates_in_place_without_flushing() {
        let gw = seeded_gateway(vec![raw("5", "JUAN", "MAYOR")]);
        let mut store = GuestListStore::load(event(), &gw);
        let id = store.records()[0].id.clone();
        store.edit(&id, EditField::Name, "juan carlos").unwrap();
        store.edit(&id, EditField::Category, "MENOR").unwrap();
        assert_eq!(store.get(&id).unwrap().name, "JUAN CARLOS");
        assert_eq!(store.get(&id).unwrap().category, Category::Minor);
        assert!(store.is_dirty());
        // Remote still has the original name until a flush happens.
        let remote = gw.stored(&event()).unwrap();
        assert_eq!(remote[0].get("Nombre"), Some(&json!("JUAN")));
    }

    #[test]
    fn edit_unknown_id_is_not_found() {
        let gw = seeded_gateway(vec![]);
        let mut store = GuestListStore::load(event(), &gw);
        let missing = GuestId::from_wire("FFFFFF");
        assert!(matches!(
            store.edit(&missing, EditField::Name, "X"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn delete_removes_and_total_drops_by_one() {
        let gw = seeded_gateway(vec![raw("5", "JUAN", "MAYOR"), {
            let mut r = raw("5", "MARTA", "MAYOR");
            r.insert("ID".into(), json!("123456"));
            r
        }]);
        let mut store = GuestListStore::load(event(), &gw);
        let before = store.aggregates().total;
        let id = store.records()[0].id.clone();
        store.delete(&gw, &id).unwrap();
        assert!(store.get(&id).is_none());
        assert_eq!(store.aggregates().total, before - 1);
        assert_eq!(gw.stored(&event()).unwrap().len(), before - 1);
    }

    #[test]
    fn aggregates_scenario() {
        let gw = seeded_gateway(vec![
            raw("5", "A", "MAYOR"),
            raw("5", "B", "MENOR"),
            raw("0", "C", "MAYOR"),
        ]);
        let store = GuestListStore::load(event(), &gw);
        let agg = store.aggregates();
        assert_eq!(agg.total, 3);
        assert_eq!(agg.tables, 1); // table 0 does not count
        assert_eq!(agg.major, 2);
        assert_eq!(agg.minor, 1);
        assert_eq!(agg.teen, 0);
        assert_eq!(agg.infant, 0);
    }

    #[test]
    fn unrecognized_category_counts_in_total_only() {
        let gw = seeded_gateway(vec![raw("1", "A", "VIP")]);
        let store = GuestListStore::load(event(), &gw);
        let agg = store.aggregates();
        assert_eq!(agg.total, 1);
        assert_eq!(agg.major + agg.teen + agg.minor + agg.infant, 0);
    }

    #[test]
    fn degraded_store_refuses_empty_overwrite() {
        let gw = seeded_gateway(vec![raw("5", "JUAN", "MAYOR")]);
        gw.set_offline(true);
        let mut store = GuestListStore::load(event(), &gw);
        gw.set_offline(false);
        assert!(matches!(store.flush(&gw), Err(StoreError::StaleEmptyOverwrite)));
        // The remote row the store never saw is still there.
        assert_eq!(gw.stored(&event()).unwrap().len(), 1);
    }

    #[test]
    fn flush_failure_keeps_state_and_later_flush_carries_edits() {
        let gw = seeded_gateway(vec![raw("5", "JUAN", "MAYOR")]);
        let mut store = GuestListStore::load(event(), &gw);
        let id = store.records()[0].id.clone();

        gw.set_offline(true);
        store.edit(&id, EditField::Notes, "alergia frutos secos").unwrap();
        assert!(matches!(store.flush(&gw), Err(StoreError::RemoteUnavailable(_))));
        assert!(store.is_dirty());
        assert_eq!(store.get(&id).unwrap().notes, "ALERGIA FRUTOS SECOS");

        gw.set_offline(false);
        store.flush(&gw).unwrap();
        assert!(!store.is_dirty());
        let remote = gw.stored(&event()).unwrap();
        assert_eq!(remote[0].get("Observaciones"), Some(&json!("ALERGIA FRUTOS SECOS")));
    }
}
