//! GS1 toolchain core library.
//!
//! Splits GS1-128 / DataMatrix element strings into application identifier
//! (AI) segments, validates each payload against the AI dictionary, and
//! converts `YYMMDD` dates to ISO form. The main entry points are [`parse`]
//! and [`parse_with_options`]; [`parse_barcode`] returns a flat record for
//! callers that only need the common fields.

#![warn(missing_docs)]

/// Flat barcode record and standalone validators.
pub mod compat;
/// Input cleaning, lookahead, and the segment driver.
pub mod decode;
/// Payload and date validation.
pub mod validate;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parser
pub use decode::parser::{clean_input, parse, parse_with_options};
pub use decode::{ErrorKind, GS, Mode, ParseOptions, ParseResult, Segment, SegmentError};

// Lookahead
pub use decode::lookahead::{AiMatch, MIN_DISTANCE, find_next_valid_ai};

// Validation
pub use validate::date::{DateConversion, DateError, convert_date};
pub use validate::{SegmentIssue, validate_segment};

// Compatibility surface
pub use compat::{
    BarcodeData, gs1_check_digit, gtin_check_digit_ok, is_valid_date, is_valid_gtin,
    parse_barcode,
};

// Diagnostics (re-exported from the diagnostics crate)
pub use decode::diag::{Diagnostic, Severity, Span, codes};
