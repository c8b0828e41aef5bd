use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Placeholder the registry sends instead of restricted table contents.
pub const MASKED: &str = "<masked>";

// ---------------------------------------------------------------------------
// Registry documents
// ---------------------------------------------------------------------------

/// The `uncertaintyTable` object of a CMC record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncertaintyTable {
    /// JSON-encoded `row_N` / `col_M` grid, or [`MASKED`].
    #[serde(default)]
    pub table_contents: Option<String>,
}

/// One entry of a registry response's `data` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmcRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub kcdb_code: Option<JsonValue>,
    #[serde(default)]
    pub quantity_value: Option<JsonValue>,
    #[serde(default)]
    pub uncertainty_table: Option<UncertaintyTable>,
}

impl CmcRecord {
    /// Raw table text, if the record carries an unmasked, non-empty table.
    pub fn table_contents(&self) -> Option<&str> {
        self.uncertainty_table
            .as_ref()
            .and_then(|t| t.table_contents.as_deref())
            .filter(|s| !s.is_empty() && *s != MASKED)
    }

    fn is_masked(&self) -> bool {
        self.uncertainty_table
            .as_ref()
            .and_then(|t| t.table_contents.as_deref())
            == Some(MASKED)
    }
}

/// What gets offered upstream for a user to pick a table from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub id: Option<i64>,
    pub kcdb_code: String,
    pub quantity_value: String,
}

/// Strings as-is, absent or null as `N/A`, anything else as JSON text.
fn display_or_na(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => "N/A".to_string(),
        Some(other) => other.to_string(),
    }
}

/// A registry search response, reduced to its CMC records.
#[derive(Debug, Clone, Default)]
pub struct RegistryResponse {
    pub records: Vec<CmcRecord>,
}

impl RegistryResponse {
    /// Parse response text. The top level must be a JSON object.
    pub fn parse(text: &str) -> Result<Self> {
        let doc: JsonValue = serde_json::from_str(text).context("parsing registry response")?;
        Self::from_json(&doc)
    }

    /// Build from an already-parsed response document.
    ///
    /// A missing or non-list `data` field yields no records. Entries that are
    /// not objects, or whose fields have unexpected types, are skipped.
    pub fn from_json(doc: &JsonValue) -> Result<Self> {
        let obj = doc
            .as_object()
            .context("Expected top-level JSON object in registry response")?;

        let Some(data) = obj.get("data").and_then(|d| d.as_array()) else {
            return Ok(Self::default());
        };

        let mut records = Vec::with_capacity(data.len());
        for (i, entry) in data.iter().enumerate() {
            if !entry.is_object() {
                debug!("data[{i}] is not an object, skipping");
                continue;
            }
            match CmcRecord::deserialize(entry) {
                Ok(record) => records.push(record),
                Err(e) => warn!("data[{i}]: skipping malformed record: {e}"),
            }
        }
        Ok(RegistryResponse { records })
    }

    /// Records with a usable uncertainty table, in document order.
    pub fn candidate_tables(&self) -> Vec<TableSummary> {
        self.records
            .iter()
            .filter(|r| {
                if r.is_masked() {
                    warn!("record {:?}: skipping masked table", r.id);
                }
                r.table_contents().is_some()
            })
            .map(|r| TableSummary {
                id: r.id,
                kcdb_code: display_or_na(r.kcdb_code.as_ref()),
                quantity_value: display_or_na(r.quantity_value.as_ref()),
            })
            .collect()
    }

    pub fn record(&self, id: i64) -> Option<&CmcRecord> {
        self.records.iter().find(|r| r.id == Some(id))
    }

    /// Raw table text of record `id`.
    pub fn table_contents(&self, id: i64) -> Result<&str> {
        let record = self
            .record(id)
            .with_context(|| format!("No record with id {id}"))?;
        if record.is_masked() {
            bail!("Record {id}: uncertainty table is access-restricted");
        }
        record
            .table_contents()
            .with_context(|| format!("Record {id} has no uncertainty table"))
    }
}
