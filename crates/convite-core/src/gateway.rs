//! The trait all remote table backends implement.
//!
//! The remote store is treated as an opaque key-value-of-rows service, one
//! table per event. Backends convert every transport, auth, or lookup fault
//! into [`Unavailable`]; raw transport errors never reach the store.

use crate::schema::RawRow;
use crate::session::EventName;

/// The remote table could not be reached or read.
///
/// Callers treat this as "empty dataset" for display, and as "not persisted"
/// for writes. It is never fatal to a session.
#[derive(Debug, Clone, thiserror::Error)]
#[error("remote table unavailable: {reason}")]
pub struct Unavailable {
    pub reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Unavailable { reason: reason.into() }
    }
}

/// Bulk read/write access to one event's remote table.
pub trait TableGateway {
    /// Fetch every data row (the header row is the backend's concern).
    fn fetch_all(&self, event: &EventName) -> Result<Vec<RawRow>, Unavailable>;

    /// Fully overwrite the table's content with the given ordered rows.
    ///
    /// A single bulk replace: there is no partial-write state to recover
    /// from, the previous content is simply gone once this succeeds.
    fn replace_all(&self, event: &EventName, rows: &[RawRow]) -> Result<(), Unavailable>;
}
