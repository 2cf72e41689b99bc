use clap::Args;
use serde_json::Value;

use realty_engine_core::equity::capital_stack::{self, CapitalStackInput, CapitalStackInputs};
use realty_engine_core::EnginePolicy;

use crate::input;

/// Arguments for capital stack construction
#[derive(Args)]
pub struct CapitalStackArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub purchase_price: Option<String>,

    /// Senior loan as a percent of price (e.g. 70); policy default when omitted
    #[arg(long, allow_hyphen_values = true)]
    pub ltv_percent: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub total_capex: Option<String>,
}

pub fn run_capital_stack(
    args: CapitalStackArgs,
    policy: Option<EnginePolicy>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut stack_input: CapitalStackInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CapitalStackInput {
            inputs: CapitalStackInputs {
                purchase_price: args.purchase_price.into(),
                ltv_percent: args.ltv_percent.into(),
                total_capex: args.total_capex.into(),
            },
            policy: EnginePolicy::default(),
        }
    };
    if let Some(policy) = policy {
        stack_input.policy = policy;
    }

    let result = capital_stack::analyze_capital_stack(&stack_input)?;
    Ok(serde_json::to_value(result)?)
}
