//! convite-core: guest-list synchronization and view-state reconciliation.
//!
//! The working copy of one event's guest list lives in memory, seeded from a
//! remote tabular store and flushed back as a single bulk overwrite:
//! - Record model and wire-schema coercion (never-failing row intake)
//! - A gateway trait over the remote table, with an in-memory backend
//! - The store: add / edit / delete / flush / aggregates
//! - Read-only projections: normalized search, per-table grouping
//! - Session lifecycle keyed by event name

pub mod gateway;
pub mod memory;
pub mod record;
pub mod schema;
pub mod session;
pub mod store;
pub mod text;
pub mod view;

pub use gateway::{TableGateway, Unavailable};
pub use memory::MemoryGateway;
pub use record::{Attendance, Category, GuestId, GuestRecord};
pub use schema::{coerce, to_row, RawRow, COLUMNS};
pub use session::{EventName, Session};
pub use store::{Aggregates, EditField, GuestListStore, NewGuest, PersistState, StoreError};
pub use view::{project, TableGroup};
