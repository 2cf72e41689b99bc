use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use realty_engine_core::deal::{self, DealAnalysisInput};
use realty_engine_core::equity::capital_stack::{self, CapitalStackInput};
use realty_engine_core::equity::waterfall::{self, DistributionInput};
use realty_engine_core::underwriting::{self, UnderwritingInputs};
use realty_engine_core::RawValue;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Coerce any JSON value (number, numeric string, null) to a decimal string.
#[napi]
pub fn to_number(value_json: String) -> NapiResult<String> {
    let raw: RawValue = serde_json::from_str(&value_json).map_err(to_napi_error)?;
    let number: Decimal = realty_engine_core::to_number(raw);
    Ok(number.to_string())
}

// ---------------------------------------------------------------------------
// Underwriting
// ---------------------------------------------------------------------------

#[napi]
pub fn underwrite(input_json: String) -> NapiResult<String> {
    let input: UnderwritingInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = underwriting::analyze_underwriting(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Equity
// ---------------------------------------------------------------------------

#[napi]
pub fn build_capital_stack(input_json: String) -> NapiResult<String> {
    let input: CapitalStackInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = capital_stack::analyze_capital_stack(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn distribute(input_json: String) -> NapiResult<String> {
    let input: DistributionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = waterfall::calculate_distribution(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Deal
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_deal(input_json: String) -> NapiResult<String> {
    let input: DealAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal::analyze_deal(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
