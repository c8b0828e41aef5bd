use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use cmc_lookup::store::{self, ResponseStore};
use cmc_lookup::{compile_table, Cell};

use super::{print_json, resolve_response, OutputFormat};

#[derive(Args, Debug)]
pub struct CellsArgs {
    /// Stored response (defaults to the newest one in the responses directory)
    pub file: Option<PathBuf>,

    /// Record id of the table to compile
    #[arg(long)]
    pub id: i64,

    /// Output format (human prints CSV)
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Flat CSV row for one compiled cell.
#[derive(Serialize)]
struct CellRow {
    v_start: f64,
    v_end: f64,
    f_start: f64,
    f_end: f64,
    z: f64,
    priority: i32,
}

impl From<&Cell> for CellRow {
    fn from(c: &Cell) -> Self {
        CellRow {
            v_start: c.x_range.start,
            v_end: c.x_range.end,
            f_start: c.y_range.start,
            f_end: c.y_range.end,
            z: c.z,
            priority: c.priority,
        }
    }
}

pub fn execute(args: CellsArgs, store: &ResponseStore) -> Result<()> {
    let path = resolve_response(args.file, store)?;
    let response = store::load(&path)?;
    let cells = compile_table(response.table_contents(args.id)?)
        .with_context(|| format!("compiling table of record {}", args.id))?;

    match args.format {
        OutputFormat::Human => write_csv(&cells, io::stdout().lock())?,
        OutputFormat::Json => print_json(&cells)?,
    }
    Ok(())
}

/// Cells in compile order, one CSV row each.
fn write_csv<W: io::Write>(cells: &[Cell], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for cell in cells {
        writer.serialize(CellRow::from(cell))?;
    }
    writer.flush()?;
    Ok(())
}
