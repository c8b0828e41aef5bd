mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;

use cmc_lookup::config::Config;
use cmc_lookup::store::ResponseStore;

#[derive(Parser)]
#[command(name = "cmc-lookup")]
#[command(about = "Look up calibration uncertainties in KCDB CMC tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Directory of stored registry responses (defaults to $RESPONSES_FOLDER or ./responses)
    #[arg(long = "responses-dir", global = true, value_name = "DIR")]
    responses_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a registry response and list its uncertainty tables
    Import(commands::import::ImportArgs),

    /// List the uncertainty tables offered by a stored response
    #[command(alias = "ls")]
    Tables(commands::tables::TablesArgs),

    /// Dump the compiled cells of a table as CSV or JSON
    Cells(commands::cells::CellsArgs),

    /// Look up the uncertainty at a voltage and frequency
    #[command(alias = "l")]
    Lookup(commands::lookup::LookupArgs),

    /// Normalize a single quantity to volts or hertz
    Parse(commands::parse::ParseArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    // RUST_LOG still overrides whatever default we pick here.
    let default_level = if cli.debug {
        "debug".to_string()
    } else {
        config.log_level.clone().unwrap_or_else(|| "warn".to_string())
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let store = ResponseStore::new(cli.responses_dir.unwrap_or(config.responses_folder));

    match cli.command {
        Commands::Import(args) => commands::import::execute(args, &store),
        Commands::Tables(args) => commands::tables::execute(args, &store),
        Commands::Cells(args) => commands::cells::execute(args, &store),
        Commands::Lookup(args) => commands::lookup::execute(args, &store),
        Commands::Parse(args) => commands::parse::execute(args),
    }
}
