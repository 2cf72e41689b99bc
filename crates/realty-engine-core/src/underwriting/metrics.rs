use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::numeric::{to_number, RawValue};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};

use super::ratios;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw figures for one deal or property. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwritingInputs {
    pub purchase_price: RawValue,
    pub closing_costs: RawValue,
    pub rehab_budget: RawValue,
    pub units: RawValue,
    /// Current net operating income
    pub noi: RawValue,
    /// Stabilised NOI after the business plan is executed
    pub projected_noi: RawValue,
    pub loan_balance: RawValue,
    /// Appraised or broker value used for LTV
    pub valuation: RawValue,
    pub annual_debt_service: RawValue,
    /// Annual cash flow after debt service
    pub cash_flow: RawValue,
    pub equity_invested: RawValue,
}

/// Underwriting snapshot for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingMetrics {
    /// Purchase price + closing costs + rehab budget
    pub total_basis: Money,
    /// NOI / purchase price (percent, 2 dp)
    pub cap_rate: Percent,
    /// Projected NOI / total basis (percent, 2 dp)
    pub yield_on_cost: Percent,
    /// NOI / annual debt service (multiple, 2 dp)
    pub dscr: Decimal,
    /// Loan balance / valuation (percent, 1 dp)
    pub ltv: Percent,
    /// Cash flow / equity invested (percent, 2 dp)
    pub cash_on_cash: Percent,
    /// Purchase price / units (whole currency)
    pub price_per_unit: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute every underwriting ratio for one record.
pub fn underwrite(inputs: &UnderwritingInputs) -> UnderwritingMetrics {
    let total_basis = ratios::total_basis(
        &inputs.purchase_price,
        &inputs.closing_costs,
        &inputs.rehab_budget,
    );

    UnderwritingMetrics {
        total_basis,
        cap_rate: ratios::cap_rate(&inputs.noi, &inputs.purchase_price),
        yield_on_cost: ratios::yield_on_cost(&inputs.projected_noi, total_basis),
        dscr: ratios::dscr(&inputs.noi, &inputs.annual_debt_service),
        ltv: ratios::ltv(&inputs.loan_balance, &inputs.valuation),
        cash_on_cash: ratios::cash_on_cash(&inputs.cash_flow, &inputs.equity_invested),
        price_per_unit: ratios::price_per_unit(&inputs.purchase_price, &inputs.units),
    }
}

/// Underwrite a record and wrap the metrics with warnings and metadata.
///
/// Warnings flag ratios that were reported as 0 because their denominator
/// was missing, plus coverage and leverage levels outside typical lending
/// norms. They never change the numbers.
pub fn analyze_underwriting(inputs: &UnderwritingInputs) -> ComputationOutput<UnderwritingMetrics> {
    let start = Instant::now();
    let metrics = underwrite(inputs);
    let warnings = collect_warnings(inputs, &metrics);

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Single-Period Underwriting Ratios",
        inputs,
        warnings,
        elapsed,
        metrics,
    )
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn collect_warnings(inputs: &UnderwritingInputs, metrics: &UnderwritingMetrics) -> Vec<String> {
    let mut warnings = Vec::new();

    let basis = RawValue::Number(metrics.total_basis);
    let degenerate = [
        ("cap_rate", "purchase_price", &inputs.purchase_price),
        ("yield_on_cost", "total_basis", &basis),
        ("dscr", "annual_debt_service", &inputs.annual_debt_service),
        ("ltv", "valuation", &inputs.valuation),
        ("cash_on_cash", "equity_invested", &inputs.equity_invested),
        ("price_per_unit", "units", &inputs.units),
    ];
    for (metric, denominator, raw) in degenerate {
        if to_number(raw) <= Decimal::ZERO {
            warnings.push(format!(
                "{denominator} is zero, negative or missing — {metric} reported as 0"
            ));
        }
    }

    if metrics.dscr > Decimal::ZERO && metrics.dscr < dec!(1.20) {
        warnings.push(format!(
            "DSCR of {:.2}x is below 1.20x — lender covenant risk",
            metrics.dscr
        ));
    }

    if metrics.ltv > dec!(80) {
        warnings.push(format!(
            "LTV of {:.1}% exceeds 80% — high leverage",
            metrics.ltv
        ));
    }

    if metrics.cap_rate > Decimal::ZERO && metrics.cap_rate < dec!(3) {
        warnings.push(format!(
            "Cap rate {}% is below 3% — unusually low, verify NOI and price",
            metrics.cap_rate
        ));
    }
    if metrics.cap_rate > dec!(12) {
        warnings.push(format!(
            "Cap rate {}% exceeds 12% — unusually high, may indicate elevated risk",
            metrics.cap_rate
        ));
    }

    warnings
}
