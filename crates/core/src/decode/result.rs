use std::collections::BTreeMap;

use gs1_toolchain_ai_tables::ai;
use serde::{Deserialize, Serialize};

use super::diag::{Diagnostic, Span, codes};

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// How the parser reacts to the first anomaly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Record the problem, skip past it, and keep scanning to the end.
    #[default]
    Lenient,
    /// Stop at the first problem and expose the rest as `raw_tail`.
    Strict,
}

/// ASCII group separator, the usual transmission of FNC1 by scanners.
pub const GS: char = '\u{1d}';

/// Options controlling a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Error policy.
    pub mode: Mode,
    /// Explicit terminator for variable-length fields. Must be ASCII.
    pub fnc1: Option<char>,
}

impl ParseOptions {
    /// Lenient options without a separator.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Strict options without a separator.
    pub fn strict() -> Self {
        Self {
            mode: Mode::Strict,
            fnc1: None,
        }
    }

    /// Use `sep` as the FNC1 separator (builder pattern).
    pub fn with_fnc1(mut self, sep: char) -> Self {
        self.fnc1 = Some(sep);
        self
    }
}

/// Category of a parse anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Two-character code not in the AI dictionary.
    UnknownAi,
    /// Fixed-length payload too short or too long.
    LengthMismatch,
    /// Variable-length payload empty or over its maximum.
    LengthOutOfRange,
    /// Character outside the AI's data type.
    InvalidCharacter,
    /// Six digits that are not a real calendar date.
    InvalidDate,
    /// Unconsumed data left at the end of the scan.
    IncompleteTail,
}

impl ErrorKind {
    /// Stable diagnostic code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::UnknownAi => codes::UNKNOWN_AI,
            ErrorKind::LengthMismatch => codes::LENGTH_MISMATCH,
            ErrorKind::LengthOutOfRange => codes::LENGTH_OUT_OF_RANGE,
            ErrorKind::InvalidCharacter => codes::INVALID_CHARACTER,
            ErrorKind::InvalidDate => codes::INVALID_DATE,
            ErrorKind::IncompleteTail => codes::INCOMPLETE_TAIL,
        }
    }
}

/// One rejected or malformed segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentError {
    /// Byte offset of the AI code in the cleaned input.
    pub position: usize,
    /// The code (or dangling fragment) read at `position`.
    pub ai: String,
    /// Category.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub reason: String,
}

impl SegmentError {
    /// Render as a toolchain [`Diagnostic`] spanning the AI code.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = Span::new(self.position, self.position + self.ai.len());
        Diagnostic::for_code(self.kind.code(), self.reason.clone(), Some(span))
            .with_context(ctx!("ai" => self.ai.clone(), "position" => self.position.to_string()))
    }
}

/// A successfully extracted segment, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// AI code.
    pub ai: String,
    /// Byte offset of the AI code.
    pub position: usize,
    /// Byte offset one past the payload (separator excluded).
    pub end: usize,
    /// Stored value: ISO date for valid dates, raw payload otherwise.
    pub value: String,
}

/// Outcome of parsing one barcode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Cleaned input that was tokenized; all positions refer to it.
    pub raw: String,
    /// Values per AI, in the order they appeared.
    pub fields: BTreeMap<String, Vec<String>>,
    /// Extracted segments with positions.
    pub segments: Vec<Segment>,
    /// First AI 01 value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_gtin: Option<String>,
    /// First AI 10 value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    /// First AI 21 value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    /// First valid AI 11 date, ISO formatted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    /// First valid AI 17 date, ISO formatted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    /// Anomalies in scan order.
    pub errors: Vec<SegmentError>,
    /// Unconsumed suffix of `raw`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_tail: Option<String>,
}

impl ParseResult {
    /// No errors and nothing left unconsumed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.raw_tail.is_none()
    }

    /// All values recorded for `ai`.
    pub fn values(&self, ai: &str) -> &[String] {
        self.fields.get(ai).map(Vec::as_slice).unwrap_or_default()
    }

    /// First value recorded for `ai`.
    pub fn first(&self, ai: &str) -> Option<&str> {
        self.values(ai).first().map(String::as_str)
    }

    /// Errors converted to diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(SegmentError::to_diagnostic).collect()
    }

    pub(crate) fn record(&mut self, segment: Segment) {
        self.fields
            .entry(segment.ai.clone())
            .or_default()
            .push(segment.value.clone());
        self.segments.push(segment);
    }

    /// Fill the convenience field for `code` unless already set.
    pub(crate) fn set_shortcut(&mut self, code: &str, value: &str) {
        let slot = match code {
            ai::GTIN => &mut self.primary_gtin,
            ai::BATCH => &mut self.batch,
            ai::SERIAL => &mut self.serial,
            ai::PROD_DATE => &mut self.production_date,
            ai::EXPIRY => &mut self.expiry,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }
}
