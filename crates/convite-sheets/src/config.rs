//! Gateway configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Worksheet holding the guest table in every event spreadsheet.
pub const DEFAULT_WORKSHEET: &str = "Invitados";

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// Connection settings for the sheets gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// API base URL; overridable for test servers.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Bearer token with spreadsheet read/write scope.
    pub token: String,
    /// Worksheet name inside each event spreadsheet.
    #[serde(default = "default_worksheet")]
    pub worksheet: String,
    /// Event name to spreadsheet id. Events without an entry are reported
    /// unavailable, never silently created.
    #[serde(default)]
    pub spreadsheets: BTreeMap<String, String>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_worksheet() -> String {
    DEFAULT_WORKSHEET.to_string()
}

/// Failure to read or parse a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SheetsConfig {
    /// Load a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Spreadsheet id mapped to an event name, if configured.
    pub fn spreadsheet_id(&self, event: &str) -> Option<&str> {
        self.spreadsheets.get(event).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_fill_in_missing_fields() {
        let cfg: SheetsConfig =
            serde_json::from_str(r#"{ "token": "abc" }"#).unwrap();
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.worksheet, DEFAULT_WORKSHEET);
        assert!(cfg.spreadsheets.is_empty());
    }

    #[test]
    fn spreadsheet_lookup() {
        let cfg: SheetsConfig = serde_json::from_str(
            r#"{
                "token": "abc",
                "spreadsheets": { "Boda Juan y Marta": "sheet-id-1" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.spreadsheet_id("Boda Juan y Marta"), Some("sheet-id-1"));
        assert_eq!(cfg.spreadsheet_id("Otro Evento"), None);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "token": "abc", "worksheet": "Lista" }}"#).unwrap();
        let cfg = SheetsConfig::from_json_file(file.path()).unwrap();
        assert_eq!(cfg.worksheet, "Lista");
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = SheetsConfig::from_json_file("/no/such/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
