use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use serde::Serialize;

use cmc_lookup::store::{self, ResponseStore};

use super::{print_json, quantity_arg, resolve_response, OutputFormat};

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Stored response (defaults to the newest one in the responses directory)
    pub file: Option<PathBuf>,

    /// Record id of the table to query
    #[arg(long)]
    pub id: i64,

    /// Voltage, e.g. "0.5 V", "500mV", '[1,"V"]' or 500
    #[arg(short = 'v', long, allow_hyphen_values = true)]
    pub voltage: String,

    /// Frequency, e.g. "10 kHz", '{"value":70,"unit":"kHz"}' or 10000
    #[arg(short = 'F', long, allow_hyphen_values = true)]
    pub frequency: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct LookupOutput {
    success: bool,
    result: Option<f64>,
}

pub fn execute(args: LookupArgs, store: &ResponseStore) -> Result<()> {
    let voltage = quantity_arg(&args.voltage)?;
    let frequency = quantity_arg(&args.frequency)?;

    let path = resolve_response(args.file, store)?;
    let response = store::load(&path)?;
    let table = response.table_contents(args.id)?;

    let result = cmc_lookup::lookup(&voltage, &frequency, table)
        .with_context(|| format!("looking up record {}", args.id))?;
    info!("record {}: V={voltage}, F={frequency} -> {result:?}", args.id);

    match args.format {
        OutputFormat::Human => match result {
            Some(u) => println!("{u}"),
            None => println!("no match"),
        },
        OutputFormat::Json => print_json(&LookupOutput {
            success: true,
            result,
        })?,
    }
    Ok(())
}
