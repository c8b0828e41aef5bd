use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use cmc_lookup::store::{self, ResponseStore};

use super::{print_json, print_tables, resolve_response, OutputFormat};

#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Stored response (defaults to the newest one in the responses directory)
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(args: TablesArgs, store: &ResponseStore) -> Result<()> {
    let path = resolve_response(args.file, store)?;
    let tables = store::load(&path)?.candidate_tables();

    match args.format {
        OutputFormat::Human => print_tables(&path, &tables),
        OutputFormat::Json => print_json(&tables)?,
    }
    Ok(())
}
