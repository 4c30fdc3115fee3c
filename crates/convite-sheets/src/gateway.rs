//! `TableGateway` implementation over the Sheets values API.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use convite_core::schema::COLUMNS;
use convite_core::{EventName, RawRow, TableGateway, Unavailable};

use crate::config::SheetsConfig;

/// Remote gateway talking to one spreadsheet per event.
pub struct SheetsGateway {
    http: Client,
    config: SheetsConfig,
}

/// Response shape of `values/{range}` reads.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsGateway {
    pub fn new(config: SheetsConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        SheetsGateway { http, config }
    }

    fn spreadsheet_id(&self, event: &EventName) -> Result<&str, Unavailable> {
        self.config
            .spreadsheet_id(event.as_str())
            .ok_or_else(|| unavailable("lookup", format!("no spreadsheet configured for {event}")))
    }

    fn values_url(&self, spreadsheet_id: &str, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}{}",
            self.config.api_base.trim_end_matches('/'),
            spreadsheet_id,
            self.config.worksheet,
            suffix
        )
    }
}

impl TableGateway for SheetsGateway {
    fn fetch_all(&self, event: &EventName) -> Result<Vec<RawRow>, Unavailable> {
        let spreadsheet_id = self.spreadsheet_id(event)?;
        let url = self.values_url(spreadsheet_id, "");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.token)
            .send()
            .map_err(|e| unavailable("fetch", e))?;
        if !response.status().is_success() {
            return Err(unavailable("fetch", format!("HTTP {}", response.status())));
        }
        let range: ValueRange = response.json().map_err(|e| unavailable("fetch", e))?;
        tracing::debug!(event = %event, rows = range.values.len().saturating_sub(1), "fetched value range");
        Ok(rows_from_values(&range.values))
    }

    fn replace_all(&self, event: &EventName, rows: &[RawRow]) -> Result<(), Unavailable> {
        let spreadsheet_id = self.spreadsheet_id(event)?;

        // Clear first so stale rows below the new extent cannot survive.
        let clear_url = self.values_url(spreadsheet_id, ":clear");
        let response = self
            .http
            .post(&clear_url)
            .bearer_auth(&self.config.token)
            .send()
            .map_err(|e| unavailable("clear", e))?;
        if !response.status().is_success() {
            return Err(unavailable("clear", format!("HTTP {}", response.status())));
        }

        let update_url = self.values_url(spreadsheet_id, "?valueInputOption=RAW");
        let body = json!({ "values": values_from_rows(rows) });
        let response = self
            .http
            .put(&update_url)
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .map_err(|e| unavailable("update", e))?;
        if !response.status().is_success() {
            return Err(unavailable("update", format!("HTTP {}", response.status())));
        }
        tracing::debug!(event = %event, rows = rows.len(), "replaced table content");
        Ok(())
    }
}

fn unavailable(stage: &str, reason: impl ToString) -> Unavailable {
    let reason = reason.to_string();
    tracing::warn!(stage, %reason, "remote table unavailable");
    Unavailable::new(reason)
}

/// Zip a raw value grid into rows keyed by the header line. Rows shorter
/// than the header simply lack those cells; coercion defaults them later.
fn rows_from_values(values: &[Vec<Value>]) -> Vec<RawRow> {
    let Some((header, data)) = values.split_first() else {
        return Vec::new();
    };
    let names: Vec<String> = header.iter().map(cell_name).collect();
    data.iter()
        .map(|cells| {
            names
                .iter()
                .zip(cells.iter())
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, cell)| (name.clone(), cell.clone()))
                .collect()
        })
        .collect()
}

/// Build the write grid: header line plus one line per row, cells in
/// canonical column order. Missing cells are written as empty strings.
fn values_from_rows(rows: &[RawRow]) -> Vec<Vec<Value>> {
    let header: Vec<Value> = COLUMNS.iter().map(|c| json!(c)).collect();
    let mut grid = vec![header];
    for row in rows {
        grid.push(
            COLUMNS
                .iter()
                .map(|c| row.get(*c).cloned().unwrap_or_else(|| json!("")))
                .collect(),
        );
    }
    grid
}

fn cell_name(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
