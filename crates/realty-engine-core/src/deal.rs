use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::equity::capital_stack::{build_capital_stack_with, CapitalStack, CapitalStackInputs};
use crate::equity::waterfall::{distribute_with_policy, DistributionResult, WaterfallTerms};
use crate::numeric::RawValue;
use crate::policy::EnginePolicy;
use crate::types::{with_metadata, AppliedDefault, ComputationOutput};
use crate::underwriting::{underwrite, UnderwritingInputs, UnderwritingMetrics};
use crate::RealtyResult;

/// Everything needed to underwrite, capitalise and distribute one deal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DealAnalysisInput {
    pub underwriting: UnderwritingInputs,
    pub capital_stack: CapitalStackInputs,
    pub distributable_cash: RawValue,
    pub pref_rate: RawValue,
    pub gp_promote_percent: RawValue,
    /// LP capital for the pref; the stack's LP equity when missing
    pub total_lp_capital: RawValue,
    pub policy: EnginePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealAnalysisOutput {
    pub underwriting: UnderwritingMetrics,
    pub capital_stack: CapitalStack,
    pub distribution: DistributionResult,
}

/// Run the full engine pipeline for one deal.
///
/// Underwriting and the capital stack are computed independently; the
/// distribution then accrues its preferred return on the supplied LP
/// capital, or on the stack's LP equity when none is supplied.
pub fn analyze_deal(input: &DealAnalysisInput) -> RealtyResult<ComputationOutput<DealAnalysisOutput>> {
    let start = Instant::now();
    input.policy.validate()?;

    let underwriting = underwrite(&input.underwriting);
    let capital_stack = build_capital_stack_with(&input.capital_stack, &input.policy);

    let terms = if input.total_lp_capital.is_missing() {
        WaterfallTerms::from_capital_stack(&capital_stack, &input.pref_rate, &input.gp_promote_percent)
    } else {
        WaterfallTerms {
            pref_rate: input.pref_rate.clone(),
            gp_promote_percent: input.gp_promote_percent.clone(),
            total_lp_capital: input.total_lp_capital.clone(),
        }
    };
    let distribution = distribute_with_policy(&input.distributable_cash, &terms, &input.policy);

    let warnings: Vec<String> = capital_stack
        .defaults_applied
        .iter()
        .chain(distribution.defaults_applied.iter())
        .map(AppliedDefault::to_warning)
        .collect();

    let output = DealAnalysisOutput {
        underwriting,
        capital_stack,
        distribution,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Deal Analysis (Underwriting, Capital Stack, Two-Tier Waterfall)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
