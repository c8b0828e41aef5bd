use anyhow::Result;
use clap::Args;

use cmc_lookup::{parse_quantity, BaseUnit};

use super::quantity_arg;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Quantity to normalize, e.g. "500 µV" or '[2,"kHz"]'
    #[arg(allow_hyphen_values = true)]
    pub quantity: String,

    /// Base unit to normalize to (V or Hz)
    #[arg(short, long, default_value = "V")]
    pub base: BaseUnit,
}

pub fn execute(args: ParseArgs) -> Result<()> {
    let quantity = quantity_arg(&args.quantity)?;
    let value = parse_quantity(&quantity, args.base)?;
    println!("{value} {}", args.base);
    Ok(())
}
