use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.08 = 8%).
pub type Rate = Decimal;

/// Ratios expressed as percentages (8.00 = 8%), as reported by underwriting.
pub type Percent = Decimal;

/// A policy fallback that replaced a missing or invalid input.
///
/// Numeric outputs are identical whether a field was defaulted or supplied
/// with the default value; this record is the only way to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDefault {
    /// Input field that was replaced
    pub field: String,
    /// Value used in its place
    pub value: Decimal,
}

impl AppliedDefault {
    pub fn new(field: &str, value: Decimal) -> Self {
        tracing::debug!(field, %value, "policy default applied");
        AppliedDefault {
            field: field.to_string(),
            value,
        }
    }

    /// Render as a human-readable envelope warning.
    pub fn to_warning(&self) -> String {
        format!(
            "{} was missing or invalid — defaulted to {}",
            self.field, self.value
        )
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
