/// Re-exports from the diagnostics crate.
pub mod diag;
/// Lookahead search for the end of a variable-length payload.
pub mod lookahead;
/// Cleaning and the segment-by-segment driver.
pub mod parser;
/// Parse options, results, and error records.
pub mod result;

pub use result::{ErrorKind, GS, Mode, ParseOptions, ParseResult, Segment, SegmentError};
