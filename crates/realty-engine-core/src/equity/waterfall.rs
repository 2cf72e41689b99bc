use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::numeric::{fraction_or, positive_or, to_number, RawValue};
use crate::policy::EnginePolicy;
use crate::types::{with_metadata, AppliedDefault, ComputationOutput, Money};
use crate::RealtyResult;

#[cfg(feature = "capital_stack")]
use super::capital_stack::CapitalStack;

pub const PREFERRED_RETURN_TIER: &str = "Preferred Return";
pub const PROMOTE_SPLIT_TIER: &str = "Promote Split";

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Deal terms governing the two-tier distribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterfallTerms {
    /// Preferred return as a fraction of LP capital (0.08 = 8%)
    pub pref_rate: RawValue,
    /// GP share of cash above the pref, as a percent (20 = 20%)
    pub gp_promote_percent: RawValue,
    /// LP capital the preferred return accrues on
    pub total_lp_capital: RawValue,
}

impl WaterfallTerms {
    /// Terms whose LP capital is the LP equity of an acquisition stack.
    #[cfg(feature = "capital_stack")]
    pub fn from_capital_stack(
        stack: &CapitalStack,
        pref_rate: impl Into<RawValue>,
        gp_promote_percent: impl Into<RawValue>,
    ) -> Self {
        WaterfallTerms {
            pref_rate: pref_rate.into(),
            gp_promote_percent: gp_promote_percent.into(),
            total_lp_capital: RawValue::Number(stack.lp_equity),
        }
    }
}

/// Envelope input: cash for the period, deal terms, optional policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributionInput {
    #[serde(default)]
    pub distributable_cash: RawValue,
    #[serde(flatten)]
    pub terms: WaterfallTerms,
    #[serde(default)]
    pub policy: EnginePolicy,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Per-component view of a distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionBreakdown {
    /// Preferred return paid to LPs
    pub pref: Money,
    /// GP promote on the tier-2 pool
    pub promote: Money,
    /// LP share of the tier-2 pool
    pub excess_lp: Money,
}

/// Result for a single waterfall tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionTier {
    pub tier_name: String,
    /// Total amount distributed in this tier
    pub amount: Money,
    pub to_gp: Money,
    pub to_lp: Money,
    /// Cash left for later tiers
    pub remaining: Money,
}

/// Full two-tier distribution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub lp_total: Money,
    pub gp_total: Money,
    /// Size of the tier-2 pool before the promote split.
    ///
    /// Tier 2 always allocates this pool in full between LP and GP, so it is
    /// not unallocated cash; nothing is ever left undistributed.
    pub remaining: Money,
    pub breakdown: DistributionBreakdown,
    /// Preferred return owed for the period (LP capital * pref rate)
    pub pref_target: Money,
    pub tiers: Vec<DistributionTier>,
    /// Inputs replaced by policy fallbacks or clamped at the boundary
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defaults_applied: Vec<AppliedDefault>,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Distribute one period's cash under the default policy.
pub fn distribute(
    distributable_cash: impl Into<RawValue>,
    terms: &WaterfallTerms,
) -> DistributionResult {
    distribute_with_policy(distributable_cash, terms, &EnginePolicy::default())
}

/// Two-tier preferred return + promote distribution.
///
/// Tier 1 pays LPs up to `total_lp_capital * pref_rate`. Only once the pref
/// is settled in full does anything reach tier 2, where the GP takes
/// `gp_promote_percent` of the pool and LPs the rest. Negative cash is
/// clamped to zero, producing an all-zero result.
///
/// A promote outside (0, 100] percent falls back to the policy promote. A
/// pref target too large for `Decimal` saturates, so all cash goes to the
/// pref.
pub fn distribute_with_policy(
    distributable_cash: impl Into<RawValue>,
    terms: &WaterfallTerms,
    policy: &EnginePolicy,
) -> DistributionResult {
    let mut defaults_applied = Vec::new();

    let mut cash = to_number(distributable_cash);
    if cash < Decimal::ZERO {
        tracing::warn!(%cash, "negative distributable cash clamped to zero");
        defaults_applied.push(AppliedDefault::new("distributable_cash", Decimal::ZERO));
        cash = Decimal::ZERO;
    }

    let (pref_rate, defaulted) = positive_or(to_number(&terms.pref_rate), policy.default_pref_rate);
    if defaulted {
        defaults_applied.push(AppliedDefault::new("pref_rate", pref_rate));
    }

    let (lp_capital, defaulted) =
        positive_or(to_number(&terms.total_lp_capital), policy.lp_capital_floor);
    if defaulted {
        defaults_applied.push(AppliedDefault::new("total_lp_capital", lp_capital));
    }

    let requested_promote = to_number(&terms.gp_promote_percent) / Decimal::ONE_HUNDRED;
    let (gp_promote, defaulted) = fraction_or(requested_promote, policy.default_gp_promote);
    if defaulted {
        defaults_applied.push(AppliedDefault::new(
            "gp_promote_percent",
            gp_promote * Decimal::ONE_HUNDRED,
        ));
    }

    // --- Tier 1: preferred return ---
    let pref_target = lp_capital.checked_mul(pref_rate).unwrap_or(Decimal::MAX);
    let lp_pref_payment = cash.min(pref_target);
    let remaining_cash = cash - lp_pref_payment;

    // --- Tier 2: promote split ---
    let (gp_promote_payment, lp_excess) = if remaining_cash > Decimal::ZERO {
        // gp_promote is at most 1, so the product never exceeds the pool
        let promote = remaining_cash.checked_mul(gp_promote).unwrap_or(Decimal::ZERO);
        (promote, remaining_cash - promote)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };
    let pool = remaining_cash.max(Decimal::ZERO);

    let tiers = vec![
        DistributionTier {
            tier_name: PREFERRED_RETURN_TIER.into(),
            amount: lp_pref_payment,
            to_gp: Decimal::ZERO,
            to_lp: lp_pref_payment,
            remaining: pool,
        },
        DistributionTier {
            tier_name: PROMOTE_SPLIT_TIER.into(),
            amount: pool,
            to_gp: gp_promote_payment,
            to_lp: lp_excess,
            remaining: Decimal::ZERO,
        },
    ];

    // Rounding near Decimal::MAX can push the sum one unit over
    let lp_total = lp_pref_payment.checked_add(lp_excess).unwrap_or(Decimal::MAX);

    DistributionResult {
        lp_total,
        gp_total: gp_promote_payment,
        remaining: pool,
        breakdown: DistributionBreakdown {
            pref: lp_pref_payment,
            promote: gp_promote_payment,
            excess_lp: lp_excess,
        },
        pref_target,
        tiers,
        defaults_applied,
    }
}

/// Validate the policy, run the distribution, and wrap it with metadata.
pub fn calculate_distribution(
    input: &DistributionInput,
) -> RealtyResult<ComputationOutput<DistributionResult>> {
    let start = Instant::now();
    input.policy.validate()?;

    let result = distribute_with_policy(&input.distributable_cash, &input.terms, &input.policy);

    let mut warnings: Vec<String> = result
        .defaults_applied
        .iter()
        .map(AppliedDefault::to_warning)
        .collect();
    if result.breakdown.pref < result.pref_target {
        warnings.push(format!(
            "Preferred return shortfall: paid {} of {} owed",
            result.breakdown.pref, result.pref_target
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Two-Tier Distribution Waterfall (Preferred Return + GP Promote)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
