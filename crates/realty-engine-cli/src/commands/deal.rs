use clap::Args;
use serde_json::Value;

use realty_engine_core::deal::{self, DealAnalysisInput};
use realty_engine_core::EnginePolicy;

use crate::input;

/// Arguments for full deal analysis
#[derive(Args)]
pub struct DealArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_deal(
    args: DealArgs,
    policy: Option<EnginePolicy>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut deal_input: DealAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for deal analysis".into());
    };
    if let Some(policy) = policy {
        deal_input.policy = policy;
    }

    let result = deal::analyze_deal(&deal_input)?;
    Ok(serde_json::to_value(result)?)
}
