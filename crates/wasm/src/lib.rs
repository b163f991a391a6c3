//! WASM bindings for the GS1 toolchain.
//!
//! Exposes parse, date, validation, and explain functions to JavaScript
//! via `wasm-bindgen`. Results are returned as plain JS objects using
//! `serde-wasm-bindgen` in JSON-compatible mode, so field maps arrive as
//! objects rather than `Map`s.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use gs1_toolchain_config::{ConfigError, ParserConfig, load_config_from_str};
use gs1_toolchain_core::{self as gs1, DateConversion, Diagnostic, ParseOptions, ParseResult};
use gs1_toolchain_diagnostics as diag;

/// Parse result plus its diagnostics, as handed to JavaScript.
#[derive(Serialize)]
struct ParseOutput<'a> {
    #[serde(flatten)]
    result: &'a ParseResult,
    diagnostics: Vec<Diagnostic>,
}

// ── Public API ──────────────────────────────────────────────────────────

/// Parse a barcode and return the full result with `diagnostics`.
///
/// `config_json` is an optional JSON/JSONC parser configuration, e.g.
/// `{ "mode": "strict", "fnc1": "GS" }`.
#[wasm_bindgen]
pub fn parse(input: &str, config_json: Option<String>) -> Result<JsValue, JsError> {
    let options =
        options_from_json(config_json.as_deref()).map_err(|e| JsError::new(&e.to_string()))?;
    let result = gs1::parse_with_options(input, &options);
    to_js(&ParseOutput {
        diagnostics: result.diagnostics(),
        result: &result,
    })
}

/// Parse leniently and return the flat `{ gtin, expiryDate, ... }` record.
#[wasm_bindgen(js_name = "parseBarcode")]
pub fn parse_barcode(input: &str) -> Result<JsValue, JsError> {
    to_js(&gs1::parse_barcode(input))
}

/// Convert `YYMMDD` to `{ date, valid, error? }`.
#[wasm_bindgen(js_name = "convertDate")]
pub fn convert_date(yymmdd: &str) -> Result<JsValue, JsError> {
    to_js(&DateConversion::from(gs1::convert_date(yymmdd)))
}

/// Exactly 14 ASCII digits.
#[wasm_bindgen(js_name = "isValidGtin")]
pub fn is_valid_gtin(s: &str) -> bool {
    gs1::is_valid_gtin(s)
}

/// `YYYY-MM-DD` shape (calendar validity is not checked).
#[wasm_bindgen(js_name = "isValidDate")]
pub fn is_valid_date(s: &str) -> bool {
    gs1::is_valid_date(s)
}

/// GTIN shape plus a matching mod-10 check digit.
#[wasm_bindgen(js_name = "gtinCheckDigitOk")]
pub fn gtin_check_digit_ok(s: &str) -> bool {
    gs1::gtin_check_digit_ok(s)
}

/// Explain a diagnostic code (e.g., "GS1201").
///
/// Returns the explanation string, or `null` if unknown.
#[wasm_bindgen]
pub fn explain(id: &str) -> Option<String> {
    diag::explain(id).map(|s| s.to_string())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn options_from_json(config_json: Option<&str>) -> Result<ParseOptions, ConfigError> {
    match config_json {
        Some(json) if !json.trim().is_empty() => load_config_from_str(json)?.to_options(),
        _ => ParserConfig::default().to_options(),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}
