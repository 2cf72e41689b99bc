use pretty_assertions::assert_eq;
use realty_engine_core::deal::{analyze_deal, DealAnalysisInput};
use realty_engine_core::equity::capital_stack::{self, CapitalStackInput};
use realty_engine_core::equity::waterfall::{self, DistributionInput, WaterfallTerms};
use realty_engine_core::underwriting::{self, UnderwritingInputs};
use realty_engine_core::{EnginePolicy, RawValue};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn standard_terms() -> WaterfallTerms {
    WaterfallTerms {
        pref_rate: dec!(0.08).into(),
        gp_promote_percent: dec!(20).into(),
        total_lp_capital: dec!(1000000).into(),
    }
}

// ===========================================================================
// Underwriting known answers
// ===========================================================================

#[test]
fn test_total_basis_known_answer() {
    assert_eq!(
        underwriting::total_basis(dec!(1000000), dec!(20000), dec!(30000)),
        dec!(1050000)
    );
}

#[test]
fn test_cap_rate_known_answer() {
    assert_eq!(underwriting::cap_rate(dec!(80000), dec!(1000000)), dec!(8.00));
}

#[test]
fn test_ltv_known_answer() {
    assert_eq!(underwriting::ltv(dec!(700000), dec!(1000000)), dec!(70.0));
}

#[test]
fn test_price_per_unit_known_answer() {
    assert_eq!(
        underwriting::price_per_unit(dec!(1000000), dec!(40)),
        dec!(25000)
    );
}

#[test]
fn test_degenerate_denominators_never_escape() {
    for bad in [
        RawValue::Missing,
        RawValue::Float(f64::NAN),
        RawValue::Float(f64::INFINITY),
        RawValue::Text("".into()),
        RawValue::Number(Decimal::ZERO),
        RawValue::Number(dec!(-1)),
    ] {
        assert_eq!(underwriting::cap_rate(dec!(80000), &bad), Decimal::ZERO);
        assert_eq!(underwriting::yield_on_cost(dec!(80000), &bad), Decimal::ZERO);
        assert_eq!(underwriting::dscr(dec!(80000), &bad), Decimal::ZERO);
        assert_eq!(underwriting::ltv(dec!(700000), &bad), Decimal::ZERO);
        assert_eq!(underwriting::cash_on_cash(dec!(1), &bad), Decimal::ZERO);
        assert_eq!(underwriting::price_per_unit(dec!(1), &bad), Decimal::ZERO);
    }
}

#[test]
fn test_underwriting_envelope_serializes() {
    let inputs: UnderwritingInputs =
        serde_json::from_str(r#"{"purchase_price": 1000000, "noi": "80000", "units": 40}"#)
            .unwrap();
    let out = underwriting::analyze_underwriting(&inputs);
    let json = serde_json::to_value(&out).unwrap();
    let decimal_at = |key: &str| -> Decimal { json["result"][key].as_str().unwrap().parse().unwrap() };
    assert_eq!(decimal_at("cap_rate"), dec!(8));
    assert_eq!(decimal_at("price_per_unit"), dec!(25000));
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
}

// ===========================================================================
// Capital stack
// ===========================================================================

#[test]
fn test_capital_stack_known_answer() {
    let stack = capital_stack::build_capital_stack(dec!(1000000), dec!(70), dec!(50000));
    assert_eq!(stack.debt_amount, dec!(700000));
    assert_eq!(stack.total_equity_required, dec!(350000));
    assert_eq!(stack.gp_equity, dec!(35000));
    assert_eq!(stack.lp_equity, dec!(315000));
}

#[test]
fn test_capital_stack_policy_from_json() {
    let input: CapitalStackInput = serde_json::from_str(
        r#"{
            "purchase_price": 1000000,
            "ltv_percent": "",
            "total_capex": 0,
            "policy": {"default_ltv": "0.65", "gp_equity_share": "0.20"}
        }"#,
    )
    .unwrap();
    let out = capital_stack::analyze_capital_stack(&input).unwrap();
    assert_eq!(out.result.debt_amount, dec!(650000));
    assert_eq!(out.result.gp_equity, dec!(70000));
    assert_eq!(out.result.lp_equity, dec!(280000));
    assert_eq!(out.warnings.len(), 1);
}

// ===========================================================================
// Waterfall
// ===========================================================================

#[test]
fn test_waterfall_full_promote_scenario() {
    let out = waterfall::distribute(dec!(250000), &standard_terms());
    assert_eq!(out.breakdown.pref, dec!(80000));
    assert_eq!(out.remaining, dec!(170000));
    assert_eq!(out.breakdown.promote, dec!(34000));
    assert_eq!(out.breakdown.excess_lp, dec!(136000));
    assert_eq!(out.lp_total, dec!(216000));
    assert_eq!(out.gp_total, dec!(34000));
}

#[test]
fn test_waterfall_pref_shortfall_scenario() {
    let out = waterfall::distribute(dec!(50000), &standard_terms());
    assert_eq!(out.breakdown.pref, dec!(50000));
    assert_eq!(out.lp_total, dec!(50000));
    assert_eq!(out.gp_total, Decimal::ZERO);
}

#[test]
fn test_waterfall_envelope_assumptions_echo_input() {
    let input = DistributionInput {
        distributable_cash: dec!(250000).into(),
        terms: standard_terms(),
        policy: EnginePolicy::default(),
    };
    let out = waterfall::calculate_distribution(&input).unwrap();
    assert_eq!(out.assumptions["distributable_cash"], "250000");
    assert_eq!(out.assumptions["gp_promote_percent"], "20");
    assert_eq!(out.result.tiers.len(), 2);
}

#[test]
fn test_waterfall_rejects_invalid_policy() {
    let input = DistributionInput {
        distributable_cash: dec!(250000).into(),
        terms: standard_terms(),
        policy: EnginePolicy {
            lp_capital_floor: dec!(-1),
            ..Default::default()
        },
    };
    assert!(waterfall::calculate_distribution(&input).is_err());
}

// ===========================================================================
// Full deal pipeline
// ===========================================================================

#[test]
fn test_deal_pipeline_end_to_end() {
    let input: DealAnalysisInput = serde_json::from_str(
        r#"{
            "underwriting": {
                "purchase_price": 1000000,
                "closing_costs": 20000,
                "rehab_budget": 30000,
                "units": 40,
                "noi": 80000,
                "projected_noi": 94500,
                "loan_balance": 700000,
                "valuation": 1000000
            },
            "capital_stack": {"purchase_price": 1000000, "ltv_percent": 70, "total_capex": 50000},
            "distributable_cash": 250000,
            "pref_rate": 0.08,
            "gp_promote_percent": 20,
            "total_lp_capital": 1000000
        }"#,
    )
    .unwrap();
    let out = analyze_deal(&input).unwrap();
    let result = &out.result;

    assert_eq!(result.underwriting.yield_on_cost, dec!(9.00));
    assert_eq!(result.underwriting.ltv, dec!(70.0));
    assert_eq!(result.capital_stack.gp_equity, dec!(35000));
    assert_eq!(result.distribution.lp_total, dec!(216000));
    assert_eq!(result.distribution.gp_total, dec!(34000));
}
