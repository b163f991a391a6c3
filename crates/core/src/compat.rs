//! Flat barcode view and standalone field validators.

use serde::{Deserialize, Serialize};

use crate::decode::parser::parse;

/// The flat record returned by [`parse_barcode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeData {
    /// First AI 01 value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    /// First valid AI 17 date (ISO).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// First AI 10 value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    /// First AI 21 value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// First valid AI 11 date (ISO).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    /// The input exactly as supplied, before cleaning.
    pub raw: String,
}

/// Parse leniently without FNC1 and keep only the shortcut fields.
///
/// Errors are dropped; use [`crate::parse`] when they matter.
pub fn parse_barcode(input: &str) -> BarcodeData {
    let result = parse(input);
    BarcodeData {
        gtin: result.primary_gtin,
        expiry_date: result.expiry,
        batch_number: result.batch,
        serial_number: result.serial,
        production_date: result.production_date,
        raw: input.to_string(),
    }
}

/// Exactly 14 ASCII digits. The check digit is not verified.
pub fn is_valid_gtin(s: &str) -> bool {
    s.len() == 14 && s.bytes().all(|b| b.is_ascii_digit())
}

/// `DDDD-DD-DD` shape. Calendar validity is not checked.
pub fn is_valid_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, &c)| match i {
            4 | 7 => c == b'-',
            _ => c.is_ascii_digit(),
        })
}

/// GS1 mod-10 check digit for a run of ASCII digits.
///
/// Weights alternate 3, 1, 3, … starting from the rightmost digit.
/// Returns `None` when `digits` contains a non-digit.
pub fn gs1_check_digit(digits: &str) -> Option<u8> {
    let mut sum = 0u32;
    for (i, b) in digits.bytes().rev().enumerate() {
        if !b.is_ascii_digit() {
            return None;
        }
        let weight = if i % 2 == 0 { 3 } else { 1 };
        sum += u32::from(b - b'0') * weight;
    }
    Some(((10 - sum % 10) % 10) as u8)
}

/// A well-formed GTIN whose final digit matches its mod-10 check digit.
pub fn gtin_check_digit_ok(s: &str) -> bool {
    if !is_valid_gtin(s) {
        return false;
    }
    let (body, check) = s.split_at(13);
    gs1_check_digit(body) == Some(check.as_bytes()[0] - b'0')
}
