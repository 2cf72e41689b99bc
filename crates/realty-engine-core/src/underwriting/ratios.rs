//! Single-period underwriting ratios.
//!
//! Every function normalizes its arguments, is defined for all inputs, and
//! reports 0 when its denominator is zero or negative. Numerators are not
//! clamped: a negative NOI gives a negative cap rate.

use rust_decimal::Decimal;

use crate::numeric::{guarded_div, percent_of, round, to_number, RawValue};
use crate::types::{Money, Percent};

/// Purchase price plus closing costs plus rehab budget.
pub fn total_basis(
    price: impl Into<RawValue>,
    closing_costs: impl Into<RawValue>,
    rehab: impl Into<RawValue>,
) -> Money {
    [to_number(price), to_number(closing_costs), to_number(rehab)]
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .unwrap_or(Decimal::ZERO)
}

/// NOI / price, as a percentage to 2 dp.
pub fn cap_rate(noi: impl Into<RawValue>, price: impl Into<RawValue>) -> Percent {
    round(percent_of(to_number(noi), to_number(price)), 2)
}

/// Projected NOI / total basis, as a percentage to 2 dp.
pub fn yield_on_cost(
    projected_noi: impl Into<RawValue>,
    total_basis: impl Into<RawValue>,
) -> Percent {
    round(percent_of(to_number(projected_noi), to_number(total_basis)), 2)
}

/// NOI / annual debt service, to 2 dp. Not a percentage.
pub fn dscr(noi: impl Into<RawValue>, annual_debt_service: impl Into<RawValue>) -> Decimal {
    let coverage = guarded_div(
        to_number(noi),
        to_number(annual_debt_service),
        Decimal::ZERO,
    );
    round(coverage, 2)
}

/// Loan / valuation, as a percentage to 1 dp.
pub fn ltv(loan_amount: impl Into<RawValue>, valuation: impl Into<RawValue>) -> Percent {
    round(percent_of(to_number(loan_amount), to_number(valuation)), 1)
}

/// Annual cash flow / equity invested, as a percentage to 2 dp.
pub fn cash_on_cash(cash_flow: impl Into<RawValue>, equity: impl Into<RawValue>) -> Percent {
    round(percent_of(to_number(cash_flow), to_number(equity)), 2)
}

/// Price / units, rounded to a whole currency amount.
pub fn price_per_unit(price: impl Into<RawValue>, units: impl Into<RawValue>) -> Money {
    round(guarded_div(to_number(price), to_number(units), Decimal::ZERO), 0)
}
