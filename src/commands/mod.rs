pub mod cells;
pub mod import;
pub mod lookup;
pub mod parse;
pub mod tables;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value as JsonValue;

use cmc_lookup::registry::TableSummary;
use cmc_lookup::store::ResponseStore;
use cmc_lookup::Quantity;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Use `file` if given, otherwise the newest response in the store.
fn resolve_response(file: Option<PathBuf>, store: &ResponseStore) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file);
    }
    store
        .list()?
        .pop()
        .with_context(|| format!("No stored responses in {}", store.root().display()))
}

/// Quantities on the command line are either JSON (`500`, `[1,"V"]`,
/// `{"value":10,"unit":"V"}`) or free text (`0.5 V`).
fn quantity_arg(raw: &str) -> Result<Quantity> {
    match serde_json::from_str::<JsonValue>(raw) {
        Ok(value) => Quantity::from_json(&value).with_context(|| format!("quantity '{raw}'")),
        Err(_) => Ok(Quantity::Text(raw.to_string())),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_tables(path: &Path, tables: &[TableSummary]) {
    println!("{}: {} uncertainty table(s)", path.display(), tables.len());
    for t in tables {
        let id = t.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        println!("  {id:>8}  {:<20}  {}", t.kcdb_code, t.quantity_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_args() {
        assert_eq!(quantity_arg("500").unwrap(), Quantity::Number(500.0));
        assert_eq!(quantity_arg("0.5 V").unwrap(), Quantity::Text("0.5 V".into()));
        assert_eq!(quantity_arg("500mV").unwrap(), Quantity::Text("500mV".into()));
        assert_eq!(
            quantity_arg(r#"[1, "V"]"#).unwrap(),
            Quantity::Pair(1.0, "V".into())
        );
        assert_eq!(
            quantity_arg(r#"{"value": 70, "unit": "kHz"}"#).unwrap(),
            Quantity::KeyValue {
                value: 70.0,
                unit: "kHz".into()
            }
        );
        assert!(quantity_arg("true").is_err());
    }

    #[test]
    fn explicit_file_wins_over_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResponseStore::new(dir.path());
        let file = PathBuf::from("elsewhere.json");
        assert_eq!(resolve_response(Some(file.clone()), &store).unwrap(), file);
        assert!(resolve_response(None, &store).is_err());
    }
}
