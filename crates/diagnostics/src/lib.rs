//! Diagnostics for the GS1 toolchain.
//!
//! Provides [`Diagnostic`], [`Severity`] and [`Span`] for reporting parser
//! findings against a (cleaned) barcode string. Diagnostic codes are defined
//! in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants generated from `spec/diagnostics.jsonc`.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The segment was rejected or could not be decoded.
    Error,
    /// The input decoded, but something looks off.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A diagnostic message produced while decoding a barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"GS1001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the cleaned barcode this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling (`ai`, `expected`, `actual`, ...).
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Create a diagnostic whose severity is the code's default from the
    /// diagnostics table, falling back to `Error` for unknown codes.
    pub fn for_code(id: &'static str, message: impl Into<String>, span: Option<Span>) -> Self {
        let severity = default_severity(id).unwrap_or(Severity::Error);
        Self::new(id, severity, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    include!(concat!(env!("OUT_DIR"), "/generated_explain.rs"))
}

/// Returns the default severity declared for a diagnostic code, if known.
pub fn default_severity(id: &str) -> Option<Severity> {
    include!(concat!(env!("OUT_DIR"), "/generated_severity.rs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Span ────────────────────────────────────────────────────────────

    #[test]
    fn span_new_valid() {
        let s = Span::new(5, 10);
        assert_eq!(s.start, 5);
        assert_eq!(s.end, 10);
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn span_zero_width() {
        let s = Span::new(7, 7);
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
    }

    #[test]
    #[should_panic(expected = "Span end (3) < start (5)")]
    fn span_new_inverted_panics() {
        Span::new(5, 3);
    }

    // ── Constructors and display ────────────────────────────────────────

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warn.to_string(), "warn");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn for_code_sets_id() {
        let d = Diagnostic::for_code(codes::UNKNOWN_AI, "unknown AI '99'", None);
        assert_eq!(d.id, "GS1001");
        assert!(d.is_error());
        assert!(d.span.is_none());
    }

    #[test]
    fn for_code_uses_table_severity() {
        let d = Diagnostic::for_code(codes::INVALID_DATE, "bad date", Some(Span::new(16, 24)));
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.span, Some(Span::new(16, 24)));
    }

    #[test]
    fn unknown_code_defaults_to_error() {
        let d = Diagnostic::for_code("GS9999", "custom", None);
        assert_eq!(d.severity, Severity::Error);
        assert!(d.explain().is_none());
        assert!(!Diagnostic::new("CUSTOM", Severity::Warn, "heads up", None).is_error());
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::for_code(codes::LENGTH_MISMATCH, "expected 14 characters, found 9", None);
        assert_eq!(d.to_string(), "error[GS1101]: expected 14 characters, found 9");
    }

    // ── Generated tables ────────────────────────────────────────────────

    #[test]
    fn all_codes_have_explanations_and_severities() {
        assert!(!codes::ALL.is_empty());
        for code in codes::ALL {
            assert!(explain(code).is_some(), "{code} has no explain() entry");
            assert!(
                default_severity(code).is_some(),
                "{code} has no default severity"
            );
        }
    }

    #[test]
    fn named_constants_are_listed() {
        for code in [
            codes::UNKNOWN_AI,
            codes::LENGTH_MISMATCH,
            codes::LENGTH_OUT_OF_RANGE,
            codes::INVALID_CHARACTER,
            codes::INVALID_DATE,
            codes::INCOMPLETE_TAIL,
        ] {
            assert!(codes::ALL.contains(&code), "{code} missing from ALL");
        }
    }

    #[test]
    fn explain_mentions_century_rule() {
        let text = explain(codes::INVALID_DATE).unwrap();
        assert!(text.contains("2000-2049"), "{text}");
    }

    #[test]
    fn explain_unknown_code() {
        assert!(explain("GS9999").is_none());
        assert!(default_severity("GS9999").is_none());
    }

    // ── Serde ───────────────────────────────────────────────────────────

    #[test]
    fn diagnostic_serde_roundtrip() {
        let d = Diagnostic::for_code(codes::UNKNOWN_AI, "unknown", Some(Span::new(10, 12)))
            .with_context(BTreeMap::from([("ai".into(), "99".into())]));
        let json = serde_json::to_string(&d).unwrap();
        let d2: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, d2);
    }

    #[test]
    fn diagnostic_serde_omits_none_fields() {
        let d = Diagnostic::for_code(codes::UNKNOWN_AI, "test", None);
        let json = serde_json::to_string(&d).unwrap();
        assert!(!json.contains("span"), "None span should be omitted: {json}");
        assert!(
            !json.contains("context"),
            "None context should be omitted: {json}"
        );
    }

    #[test]
    fn context_serializes_in_key_order() {
        let d = Diagnostic::for_code(codes::LENGTH_MISMATCH, "test", None).with_context(
            BTreeMap::from([
                ("expected".into(), "14".into()),
                ("actual".into(), "9".into()),
                ("ai".into(), "01".into()),
            ]),
        );
        let json = serde_json::to_string(&d).unwrap();
        let a = json.find("\"actual\"").unwrap();
        let b = json.find("\"ai\"").unwrap();
        let c = json.find("\"expected\"").unwrap();
        assert!(a < b && b < c, "keys out of order: {json}");
    }
}
