use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RealtyError;
use crate::types::{Money, Rate};
use crate::RealtyResult;

/// LTV fraction used when a deal's LTV percent is missing or not positive.
pub const DEFAULT_LTV: Rate = dec!(0.70);
/// GP share of required equity; the LP receives the complement.
pub const GP_EQUITY_SHARE: Rate = dec!(0.10);
/// Preferred return rate used when the terms omit one.
pub const DEFAULT_PREF_RATE: Rate = dec!(0.08);
/// GP promote fraction used when the terms omit one.
pub const DEFAULT_GP_PROMOTE: Rate = dec!(0.20);
/// LP capital used when the terms omit it. Keeps the preferred return
/// finite; a missing capital figure yields a near-zero pref.
pub const LP_CAPITAL_FLOOR: Money = dec!(1);

/// Fallbacks and fixed splits applied by the engine.
///
/// Every field defaults independently, so a partial document overrides
/// only the fields it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    pub default_ltv: Rate,
    pub gp_equity_share: Rate,
    pub default_pref_rate: Rate,
    pub default_gp_promote: Rate,
    pub lp_capital_floor: Money,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        EnginePolicy {
            default_ltv: DEFAULT_LTV,
            gp_equity_share: GP_EQUITY_SHARE,
            default_pref_rate: DEFAULT_PREF_RATE,
            default_gp_promote: DEFAULT_GP_PROMOTE,
            lp_capital_floor: LP_CAPITAL_FLOOR,
        }
    }
}

impl EnginePolicy {
    /// Reject caller-supplied policies whose fractions are out of range.
    pub fn validate(&self) -> RealtyResult<()> {
        check_range("default_ltv", self.default_ltv, false)?;
        check_range("gp_equity_share", self.gp_equity_share, true)?;
        check_range("default_pref_rate", self.default_pref_rate, false)?;
        check_range("default_gp_promote", self.default_gp_promote, true)?;
        if self.lp_capital_floor <= Decimal::ZERO {
            return Err(RealtyError::InvalidPolicy {
                field: "lp_capital_floor".into(),
                reason: "LP capital floor must be positive".into(),
            });
        }
        Ok(())
    }

    pub fn lp_equity_share(&self) -> Rate {
        Decimal::ONE - self.gp_equity_share
    }
}

fn check_range(field: &str, value: Rate, zero_allowed: bool) -> RealtyResult<()> {
    let low_ok = if zero_allowed {
        value >= Decimal::ZERO
    } else {
        value > Decimal::ZERO
    };
    if !low_ok || value > Decimal::ONE {
        let lower = if zero_allowed { "[0" } else { "(0" };
        return Err(RealtyError::InvalidPolicy {
            field: field.into(),
            reason: format!("must be a fraction in {lower}, 1], got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = EnginePolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.default_ltv, dec!(0.70));
        assert_eq!(policy.lp_equity_share(), dec!(0.90));
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let policy: EnginePolicy = serde_json::from_str(r#"{"default_pref_rate": "0.06"}"#).unwrap();
        assert_eq!(policy.default_pref_rate, dec!(0.06));
        assert_eq!(policy.default_ltv, DEFAULT_LTV);
        assert_eq!(policy.default_gp_promote, DEFAULT_GP_PROMOTE);
    }

    #[test]
    fn test_zero_gp_share_allowed() {
        let policy = EnginePolicy {
            gp_equity_share: Decimal::ZERO,
            ..Default::default()
        };
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_fractions_rejected() {
        let policy = EnginePolicy {
            default_ltv: dec!(1.2),
            ..Default::default()
        };
        match policy.validate().unwrap_err() {
            RealtyError::InvalidPolicy { field, .. } => assert_eq!(field, "default_ltv"),
            other => panic!("Expected InvalidPolicy, got: {other:?}"),
        }

        let policy = EnginePolicy {
            default_pref_rate: Decimal::ZERO,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_non_positive_capital_floor_rejected() {
        let policy = EnginePolicy {
            lp_capital_floor: Decimal::ZERO,
            ..Default::default()
        };
        match policy.validate().unwrap_err() {
            RealtyError::InvalidPolicy { field, .. } => assert_eq!(field, "lp_capital_floor"),
            other => panic!("Expected InvalidPolicy, got: {other:?}"),
        }
    }
}
