//! Browser bindings for the bond valuation engine.
//!
//! The page owns all presentation: chart and table rendering, input
//! debouncing, view toggles, and accessibility announcements. These bindings
//! expose the engine and the input validator as JSON-string functions; on any
//! failure they raise a JS error and return no partial result, so the caller
//! clears its display instead of showing a stale valuation.

use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use bond_calc_core::validator;
use bond_calc_core::valuation::bond::{self, BondParameters};

/// Set up the panic hook so a panic surfaces as a readable console message.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Convert any Display error into a JsError.
fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Outcome of a bounds check, shaped for per-field error display.
#[derive(Debug, Serialize)]
struct CheckReport {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

/// Validate and price a bond from a JSON parameter object; returns the
/// serialized computation envelope.
#[wasm_bindgen]
pub fn value_bond(input_json: String) -> Result<String, JsError> {
    let params: BondParameters = serde_json::from_str(&input_json).map_err(to_js_error)?;
    validator::validate_bounds(&params).map_err(to_js_error)?;
    let output = bond::value_bond(&params).map_err(to_js_error)?;
    serde_json::to_string(&output).map_err(to_js_error)
}

/// Price a bond from plain numeric inputs, the form a browser form supplies.
#[wasm_bindgen]
pub fn value_bond_from(
    face_value: f64,
    coupon_rate: f64,
    ytm: f64,
    years: f64,
    frequency: u32,
) -> Result<String, JsError> {
    let params = BondParameters {
        face_value: to_decimal(face_value, "face_value")?,
        coupon_rate: to_decimal(coupon_rate, "coupon_rate")?,
        ytm: to_decimal(ytm, "ytm")?,
        years: to_decimal(years, "years")?,
        frequency,
    };
    validator::validate_bounds(&params).map_err(to_js_error)?;
    let output = bond::value_bond(&params).map_err(to_js_error)?;
    serde_json::to_string(&output).map_err(to_js_error)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Run the bounds check only; returns a report instead of throwing so the
/// page can render the violation message next to the offending field.
#[wasm_bindgen]
pub fn check_bounds(input_json: String) -> Result<String, JsError> {
    let params: BondParameters = serde_json::from_str(&input_json).map_err(to_js_error)?;
    let report = match validator::validate_bounds(&params) {
        Ok(()) => CheckReport {
            valid: true,
            error: None,
        },
        Err(e) => CheckReport {
            valid: false,
            error: Some(e.to_string()),
        },
    };
    serde_json::to_string(&report).map_err(to_js_error)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_decimal(value: f64, field: &str) -> Result<Decimal, JsError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| JsError::new(&format!("{field} is not a finite number")))
}
