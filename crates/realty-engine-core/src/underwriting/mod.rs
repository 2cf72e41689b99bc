pub mod metrics;
pub mod ratios;

pub use metrics::{analyze_underwriting, underwrite, UnderwritingInputs, UnderwritingMetrics};
pub use ratios::{cap_rate, cash_on_cash, dscr, ltv, price_per_unit, total_basis, yield_on_cost};
