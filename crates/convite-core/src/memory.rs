//! In-memory table backend.
//!
//! Holds per-event row tables in a `RefCell`, mirroring the bulk-overwrite
//! semantics of the remote service. Used by the integration tests and as an
//! offline backend; the switchable `offline` flag simulates outages.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::gateway::{TableGateway, Unavailable};
use crate::schema::RawRow;
use crate::session::EventName;

/// A `TableGateway` backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    tables: RefCell<BTreeMap<String, Vec<RawRow>>>,
    offline: RefCell<bool>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one event's table with rows.
    pub fn seed(&self, event: &EventName, rows: Vec<RawRow>) {
        self.tables.borrow_mut().insert(event.as_str().to_string(), rows);
    }

    /// Toggle outage simulation: while offline, both operations report
    /// [`Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        *self.offline.borrow_mut() = offline;
    }

    /// Snapshot of one event's stored rows, if the table exists.
    pub fn stored(&self, event: &EventName) -> Option<Vec<RawRow>> {
        self.tables.borrow().get(event.as_str()).cloned()
    }
}

impl TableGateway for MemoryGateway {
    fn fetch_all(&self, event: &EventName) -> Result<Vec<RawRow>, Unavailable> {
        if *self.offline.borrow() {
            return Err(Unavailable::new("offline"));
        }
        self.tables
            .borrow()
            .get(event.as_str())
            .cloned()
            .ok_or_else(|| Unavailable::new(format!("no table for event {}", event.as_str())))
    }

    fn replace_all(&self, event: &EventName, rows: &[RawRow]) -> Result<(), Unavailable> {
        if *self.offline.borrow() {
            return Err(Unavailable::new("offline"));
        }
        self.tables
            .borrow_mut()
            .insert(event.as_str().to_string(), rows.to_vec());
        Ok(())
    }
}
