use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::numeric::{positive_or, to_number, RawValue};
use crate::policy::EnginePolicy;
use crate::types::{with_metadata, AppliedDefault, ComputationOutput, Money};
use crate::RealtyResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Acquisition economics that determine the debt / equity split.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalStackInputs {
    pub purchase_price: RawValue,
    /// Senior loan sizing as a percent of price (70 = 70%)
    pub ltv_percent: RawValue,
    /// Renovation and capital expenditure funded with equity
    pub total_capex: RawValue,
}

/// Envelope input: deal economics plus an optional policy override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapitalStackInput {
    #[serde(flatten)]
    pub inputs: CapitalStackInputs,
    #[serde(default)]
    pub policy: EnginePolicy,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Debt and equity layers financing an acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalStack {
    /// Purchase price * LTV
    pub debt_amount: Money,
    /// Price not covered by debt, plus capex
    pub total_equity_required: Money,
    /// GP co-invest share of required equity
    pub gp_equity: Money,
    /// LP share of required equity
    pub lp_equity: Money,
    /// Inputs replaced by policy fallbacks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defaults_applied: Vec<AppliedDefault>,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Build a capital stack under the default policy (70% LTV fallback,
/// 10/90 GP/LP equity split).
pub fn build_capital_stack(
    purchase_price: impl Into<RawValue>,
    ltv_percent: impl Into<RawValue>,
    total_capex: impl Into<RawValue>,
) -> CapitalStack {
    let inputs = CapitalStackInputs {
        purchase_price: purchase_price.into(),
        ltv_percent: ltv_percent.into(),
        total_capex: total_capex.into(),
    };
    build_capital_stack_with(&inputs, &EnginePolicy::default())
}

/// Build a capital stack under an explicit policy.
///
/// A non-positive or unparseable LTV falls back to `policy.default_ltv`.
/// LP equity is computed as the remainder so the split always sums to the
/// required equity exactly. Magnitudes that overflow `Decimal` yield an
/// all-zero stack.
pub fn build_capital_stack_with(
    inputs: &CapitalStackInputs,
    policy: &EnginePolicy,
) -> CapitalStack {
    let mut defaults_applied = Vec::new();

    let purchase_price = to_number(&inputs.purchase_price);
    let total_capex = to_number(&inputs.total_capex);

    let requested_ltv = to_number(&inputs.ltv_percent) / Decimal::ONE_HUNDRED;
    let (ltv, defaulted) = positive_or(requested_ltv, policy.default_ltv);
    if defaulted {
        defaults_applied.push(AppliedDefault::new("ltv_percent", ltv * Decimal::ONE_HUNDRED));
    }

    let Some((debt_amount, total_equity_required, gp_equity, lp_equity)) =
        stack_layers(purchase_price, ltv, total_capex, policy.gp_equity_share)
    else {
        tracing::warn!(%purchase_price, %ltv, %total_capex, "capital stack overflowed; reported as zero");
        return CapitalStack {
            debt_amount: Decimal::ZERO,
            total_equity_required: Decimal::ZERO,
            gp_equity: Decimal::ZERO,
            lp_equity: Decimal::ZERO,
            defaults_applied,
        };
    };

    CapitalStack {
        debt_amount,
        total_equity_required,
        gp_equity,
        lp_equity,
        defaults_applied,
    }
}

/// Debt, total equity, GP equity and LP equity, or `None` when any layer
/// exceeds `Decimal`'s range.
fn stack_layers(
    purchase_price: Money,
    ltv: Decimal,
    total_capex: Money,
    gp_equity_share: Decimal,
) -> Option<(Money, Money, Money, Money)> {
    let debt_amount = purchase_price.checked_mul(ltv)?;
    let total_equity_required = purchase_price
        .checked_sub(debt_amount)?
        .checked_add(total_capex)?;
    let gp_equity = total_equity_required.checked_mul(gp_equity_share)?;
    let lp_equity = total_equity_required.checked_sub(gp_equity)?;
    Some((debt_amount, total_equity_required, gp_equity, lp_equity))
}

/// Validate the policy, build the stack, and wrap it with metadata.
pub fn analyze_capital_stack(
    input: &CapitalStackInput,
) -> RealtyResult<ComputationOutput<CapitalStack>> {
    let start = Instant::now();
    input.policy.validate()?;

    let stack = build_capital_stack_with(&input.inputs, &input.policy);
    let warnings = stack
        .defaults_applied
        .iter()
        .map(AppliedDefault::to_warning)
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Acquisition Capital Stack (Senior Debt + GP/LP Equity)",
        &serde_json::json!({
            "purchase_price": input.inputs.purchase_price,
            "ltv_percent": input.inputs.ltv_percent,
            "total_capex": input.inputs.total_capex,
            "default_ltv": input.policy.default_ltv.to_string(),
            "gp_equity_share": input.policy.gp_equity_share.to_string(),
        }),
        warnings,
        elapsed,
        stack,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
