use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value as JsonValue;

use cmc_lookup::registry::{RegistryResponse, TableSummary};
use cmc_lookup::store::{ResponseStore, DEFAULT_PREFIX};

use super::{print_json, print_tables, OutputFormat};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Registry search response (JSON) to store
    pub file: PathBuf,

    /// File name prefix inside the responses directory
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ImportOutput<'a> {
    success: bool,
    filename: String,
    tables: &'a [TableSummary],
}

pub fn execute(args: ImportArgs, store: &ResponseStore) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let document: JsonValue = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", args.file.display()))?;

    // Validate before writing anything to the store; the file is kept as read.
    let response = RegistryResponse::from_json(&document)?;
    let tables = response.candidate_tables();

    let stored = store.save(&args.prefix, &text)?;

    match args.format {
        OutputFormat::Human => print_tables(&stored, &tables),
        OutputFormat::Json => print_json(&ImportOutput {
            success: true,
            filename: stored.display().to_string(),
            tables: &tables,
        })?,
    }
    Ok(())
}
