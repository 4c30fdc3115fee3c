//! convite-sheets: the remote table backend over the Google Sheets values API.
//!
//! One spreadsheet per event, one worksheet holding the guest table with its
//! header row. Reads pull the whole value range; writes clear the worksheet
//! and push the full working copy back in one bulk update. Every transport,
//! auth, or lookup fault is converted to [`convite_core::Unavailable`] and
//! logged — callers never see a raw HTTP error.
//!
//! Credential issuance (service accounts, token refresh) stays outside this
//! crate; the config carries an already-usable bearer token.

pub mod config;
pub mod gateway;

pub use config::{ConfigError, SheetsConfig};
pub use gateway::SheetsGateway;
