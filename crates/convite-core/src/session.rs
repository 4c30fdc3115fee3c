//! Session lifecycle and event selection.
//!
//! Event identity arrives as a request parameter; underscores map to spaces
//! and the display form is also the lookup key, so load and save always
//! address the same table. A session owns the gateway and at most one loaded
//! store — there is no ambient global list — and reloads only when the event
//! name changes. Every user-facing operation (add, edit, delete, save,
//! search) goes through the session, one at a time, to completion.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gateway::TableGateway;
use crate::record::GuestId;
use crate::store::{
    Aggregates, EditField, GuestListStore, NewGuest, PersistState, StoreError,
};
use crate::view::{project, TableGroup};

/// Placeholder event used when no parameter is supplied.
pub const DEFAULT_EVENT: &str = "Boda Juan y Marta";

/// Identity of one guest list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
    /// Derive the event name from the request parameter. Absent or blank
    /// parameters fall back to the placeholder; underscores become spaces.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") => EventName(DEFAULT_EVENT.to_string()),
            Some(raw) => EventName(raw.replace('_', " ")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One operator's session: a gateway plus the working copy of the event
/// currently on screen.
pub struct Session<G: TableGateway> {
    gateway: G,
    current: Option<GuestListStore>,
}

impl<G: TableGateway> Session<G> {
    pub fn new(gateway: G) -> Self {
        Session { gateway, current: None }
    }

    /// Add a guest to the event named by `param` (flushes immediately).
    pub fn add(
        &mut self,
        param: Option<&str>,
        new: NewGuest,
    ) -> Result<(GuestId, PersistState), StoreError> {
        let (store, gateway) = self.parts(param);
        store.add(gateway, new)
    }

    /// Apply one completed inline field change (kept local until a save).
    pub fn edit(
        &mut self,
        param: Option<&str>,
        id: &GuestId,
        field: EditField,
        value: &str,
    ) -> Result<(), StoreError> {
        let (store, _) = self.parts(param);
        store.edit(id, field, value)
    }

    /// Remove a guest (flushes immediately).
    pub fn delete(&mut self, param: Option<&str>, id: &GuestId) -> Result<PersistState, StoreError> {
        let (store, gateway) = self.parts(param);
        store.delete(gateway, id)
    }

    /// Explicit save: push the working copy, including accumulated edits.
    pub fn save(&mut self, param: Option<&str>) -> Result<(), StoreError> {
        let (store, gateway) = self.parts(param);
        store.flush(gateway)
    }

    /// Aggregate counts for the event's current working copy.
    pub fn aggregates(&mut self, param: Option<&str>) -> Aggregates {
        let (store, _) = self.parts(param);
        store.aggregates()
    }

    /// Filtered, table-grouped view of the event's current working copy.
    pub fn search(&mut self, param: Option<&str>, query: &str) -> Vec<TableGroup> {
        let (store, _) = self.parts(param);
        project(store.records(), query)
    }

    /// The currently loaded store, if any event has been referenced yet.
    pub fn current(&self) -> Option<&GuestListStore> {
        self.current.as_ref()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Load-if-needed, then split-borrow the store and the gateway so store
    /// operations can flush through the session-owned gateway.
    fn parts(&mut self, param: Option<&str>) -> (&mut GuestListStore, &G) {
        let event = EventName::from_param(param);
        let reload = self
            .current
            .as_ref()
            .map_or(true, |store| store.event() != &event);
        if reload {
            self.current = Some(GuestListStore::load(event, &self.gateway));
        }
        let store = self.current.as_mut().expect("just loaded");
        (store, &self.gateway)
    }
}
