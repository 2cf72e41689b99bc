use clap::Args;
use serde_json::Value;

use realty_engine_core::equity::waterfall::{self, DistributionInput, WaterfallTerms};
use realty_engine_core::EnginePolicy;

use crate::input;

/// Arguments for a two-tier waterfall distribution
#[derive(Args)]
pub struct DistributeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Cash available for distribution this period
    #[arg(long, allow_hyphen_values = true)]
    pub cash: Option<String>,

    /// Preferred return as a fraction of LP capital (e.g. 0.08)
    #[arg(long, allow_hyphen_values = true)]
    pub pref_rate: Option<String>,

    /// GP promote as a percent of cash above the pref (e.g. 20)
    #[arg(long, allow_hyphen_values = true)]
    pub gp_promote_percent: Option<String>,

    /// LP capital the preferred return accrues on
    #[arg(long, allow_hyphen_values = true)]
    pub total_lp_capital: Option<String>,
}

pub fn run_distribute(
    args: DistributeArgs,
    policy: Option<EnginePolicy>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut dist_input: DistributionInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let cash = args.cash.ok_or("--cash is required (or provide --input)")?;
        DistributionInput {
            distributable_cash: cash.into(),
            terms: WaterfallTerms {
                pref_rate: args.pref_rate.into(),
                gp_promote_percent: args.gp_promote_percent.into(),
                total_lp_capital: args.total_lp_capital.into(),
            },
            policy: EnginePolicy::default(),
        }
    };
    if let Some(policy) = policy {
        dist_input.policy = policy;
    }

    let result = waterfall::calculate_distribution(&dist_input)?;
    Ok(serde_json::to_value(result)?)
}
