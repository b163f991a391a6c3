//! Diagnostic ID constants.
//!
//! Auto-generated from `spec/diagnostics.jsonc` at build time.
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete.

include!(concat!(env!("OUT_DIR"), "/generated_codes.rs"));

/// Every diagnostic ID, in the order declared in `spec/diagnostics.jsonc`.
pub const ALL: &[&str] = include!(concat!(env!("OUT_DIR"), "/generated_all_codes.rs"));
