use clap::Args;
use serde_json::Value;

use realty_engine_core::underwriting::{self, UnderwritingInputs};

use crate::input;

/// Arguments for underwriting ratios. Values are passed through the engine's
/// normalizer, so blanks or text collapse to zero rather than failing.
#[derive(Args)]
pub struct UnderwriteArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub purchase_price: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub closing_costs: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub rehab_budget: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub units: Option<String>,

    /// Current net operating income
    #[arg(long, allow_hyphen_values = true)]
    pub noi: Option<String>,

    /// Stabilised NOI, used for yield on cost
    #[arg(long, allow_hyphen_values = true)]
    pub projected_noi: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub loan_balance: Option<String>,

    /// Property valuation, used for LTV
    #[arg(long, allow_hyphen_values = true)]
    pub valuation: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub annual_debt_service: Option<String>,

    /// Annual cash flow after debt service
    #[arg(long, allow_hyphen_values = true)]
    pub cash_flow: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub equity_invested: Option<String>,
}

pub fn run_underwrite(args: UnderwriteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: UnderwritingInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        UnderwritingInputs {
            purchase_price: args.purchase_price.into(),
            closing_costs: args.closing_costs.into(),
            rehab_budget: args.rehab_budget.into(),
            units: args.units.into(),
            noi: args.noi.into(),
            projected_noi: args.projected_noi.into(),
            loan_balance: args.loan_balance.into(),
            valuation: args.valuation.into(),
            annual_debt_service: args.annual_debt_service.into(),
            cash_flow: args.cash_flow.into(),
            equity_invested: args.equity_invested.into(),
        }
    };

    let result = underwriting::analyze_underwriting(&inputs);
    Ok(serde_json::to_value(result)?)
}
