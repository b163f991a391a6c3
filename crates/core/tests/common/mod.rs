//! Shared test helpers for `gs1_toolchain_core` integration tests.

#![allow(unreachable_pub)]

use gs1_toolchain_core::{ErrorKind, ParseResult};

// ─── Fixtures ────────────────────────────────────────────────────────────────

/// GTIN with a correct check digit.
#[allow(dead_code)]
pub const GTIN: &str = "09506000134352";

/// `01` segment carrying [`GTIN`].
#[allow(dead_code)]
pub fn gtin_segment() -> String {
    format!("01{GTIN}")
}

// ─── Parse-result helpers ────────────────────────────────────────────────────

/// Error kinds in scan order.
#[allow(dead_code)]
pub fn error_kinds(result: &ParseResult) -> Vec<ErrorKind> {
    result.errors.iter().map(|e| e.kind).collect()
}

/// AI codes of the extracted segments, in input order.
#[allow(dead_code)]
pub fn segment_ais(result: &ParseResult) -> Vec<&str> {
    result.segments.iter().map(|s| s.ai.as_str()).collect()
}

/// Byte offsets of the extracted segments.
#[allow(dead_code)]
pub fn segment_positions(result: &ParseResult) -> Vec<usize> {
    result.segments.iter().map(|s| s.position).collect()
}

/// Assert the result has no errors and no tail.
#[allow(dead_code)]
pub fn assert_clean(result: &ParseResult) {
    assert!(
        result.is_clean(),
        "expected a clean parse of {:?}, got errors {:?} and tail {:?}",
        result.raw,
        result.errors,
        result.raw_tail
    );
}
