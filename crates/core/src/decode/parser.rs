use gs1_toolchain_ai_tables::{self as tables, AiSpec, LengthKind};
use tracing::debug;

use super::lookahead::{MIN_DISTANCE, find_next_valid_ai};
use super::result::{ErrorKind, Mode, ParseOptions, ParseResult, Segment, SegmentError};
use crate::validate::{date::convert_date, validate_segment};

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse a barcode in lenient mode without an FNC1 separator.
pub fn parse(input: &str) -> ParseResult {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a barcode with explicit options.
///
/// Never fails: every anomaly is reported in [`ParseResult::errors`].
/// Lenient mode always consumes the whole input; only a strict stop leaves
/// [`ParseResult::raw_tail`].
pub fn parse_with_options(input: &str, options: &ParseOptions) -> ParseResult {
    let cleaned = clean_input(input, options.fnc1);
    if cleaned.len() != input.len() {
        debug!(
            removed = input.chars().count() - cleaned.len(),
            "stripped non-printable characters"
        );
    }
    Tokenizer::new(&cleaned, options).run()
}

/// Remove every character outside printable ASCII (`0x20`–`0x7E`).
///
/// An ASCII `fnc1` separator is kept even when it is a control character,
/// so the group separator (`0x1D`) can delimit fields.
pub fn clean_input(input: &str, fnc1: Option<char>) -> String {
    let keep_sep = fnc1.filter(char::is_ascii);
    input
        .chars()
        .filter(|&c| matches!(c, ' '..='~') || Some(c) == keep_sep)
        .collect()
}

// ─── Tokenizer ──────────────────────────────────────────────────────────────

/// Whether the scan continues after a step.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

struct Tokenizer<'a> {
    input: &'a str,
    mode: Mode,
    fnc1: Option<char>,
    pos: usize,
    result: ParseResult,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            input,
            mode: options.mode,
            fnc1: options.fnc1.filter(char::is_ascii),
            pos: 0,
            result: ParseResult {
                raw: input.to_string(),
                ..ParseResult::default()
            },
        }
    }

    fn len(&self) -> usize {
        self.input.len()
    }

    fn at_separator(&self) -> bool {
        self.fnc1
            .is_some_and(|sep| self.input.as_bytes()[self.pos] == sep as u8)
    }

    // ── Main loop ───────────────────────────────────────────────────────

    fn run(mut self) -> ParseResult {
        while self.pos < self.len() {
            if self.at_separator() {
                self.pos += 1;
                continue;
            }
            if self.step() == Flow::Halt {
                self.halt();
                break;
            }
        }
        self.result
    }

    /// Decode the segment at `self.pos`.
    fn step(&mut self) -> Flow {
        let input = self.input;
        let start = self.pos;
        let Some(code) = input.get(start..start + 2) else {
            let fragment = &input[start..];
            self.push_error(
                start,
                fragment,
                ErrorKind::IncompleteTail,
                format!("Incomplete or invalid segment: dangling {fragment:?} at end of input"),
            );
            return match self.mode {
                Mode::Lenient => {
                    self.pos = self.len();
                    Flow::Continue
                }
                Mode::Strict => Flow::Halt,
            };
        };

        let Some(spec) = tables::lookup(code) else {
            self.push_error(start, code, ErrorKind::UnknownAi, format!("Unknown AI '{code}'"));
            return self.recover(start);
        };

        let payload_start = start + 2;
        let (payload_end, next) = match spec.length {
            LengthKind::Fixed { length } => {
                let available = self.len() - payload_start;
                if available < length {
                    self.push_error(
                        start,
                        code,
                        ErrorKind::LengthMismatch,
                        format!(
                            "Length mismatch for AI {code}: expected {length} characters, only {available} remain"
                        ),
                    );
                    return self.recover(start);
                }
                (payload_start + length, payload_start + length)
            }
            LengthKind::Variable { max_length } => self.variable_bounds(spec, start, max_length),
        };

        let payload = &input[payload_start..payload_end];
        if let Err(issue) = validate_segment(payload, spec) {
            self.push_error(start, code, issue.kind(), format!("AI {code}: {issue}"));
            return self.recover(start);
        }

        let mut flow = Flow::Continue;
        let value = if spec.is_date {
            match convert_date(payload) {
                Ok(iso) => {
                    self.result.set_shortcut(spec.code, &iso);
                    iso
                }
                Err(e) => {
                    self.push_error(
                        start,
                        code,
                        ErrorKind::InvalidDate,
                        format!("Date validation failed for AI {code} ({payload}): {e}"),
                    );
                    if self.mode == Mode::Strict {
                        flow = Flow::Halt;
                    }
                    payload.to_string()
                }
            }
        } else {
            self.result.set_shortcut(spec.code, payload);
            payload.to_string()
        };

        debug!(ai = spec.code, position = start, value = %value, "segment extracted");
        self.result.record(Segment {
            ai: spec.code.to_string(),
            position: start,
            end: payload_end,
            value,
        });
        self.pos = next;
        flow
    }

    /// Payload end and resume position for a variable-length AI at `start`.
    ///
    /// Resolution order: FNC1 separator within reach, then the nearest
    /// valid lookahead boundary, then the maximum length (or end of input).
    fn variable_bounds(&self, spec: &AiSpec, start: usize, max_length: usize) -> (usize, usize) {
        let payload_start = start + 2;

        if let Some(sep) = self.fnc1 {
            // The separator may sit directly after a full-length payload.
            let reach = (payload_start + max_length + 1).min(self.len());
            if let Some(offset) = self.input[payload_start..reach].find(sep) {
                let end = payload_start + offset;
                return (end, end + 1);
            }
        }

        if let Some(m) = find_next_valid_ai(self.input, start, MIN_DISTANCE, spec.code) {
            debug!(ai = spec.code, next = m.ai, at = m.position, "variable field split");
            return (m.position, m.position);
        }

        let end = payload_start + max_length.min(self.len() - payload_start);
        (end, end)
    }

    // ── Error handling ──────────────────────────────────────────────────

    fn push_error(&mut self, position: usize, ai: &str, kind: ErrorKind, reason: String) {
        debug!(position, ai, ?kind, %reason, "segment rejected");
        self.result.errors.push(SegmentError {
            position,
            ai: ai.to_string(),
            kind,
            reason,
        });
    }

    /// Lenient mode re-synchronises two characters past the rejected code;
    /// strict mode stops with the cursor on it.
    fn recover(&mut self, start: usize) -> Flow {
        match self.mode {
            Mode::Lenient => {
                self.pos = start + 2;
                Flow::Continue
            }
            Mode::Strict => {
                self.pos = start;
                Flow::Halt
            }
        }
    }

    /// Expose the unconsumed suffix and flag it when it begins with a known AI.
    fn halt(&mut self) {
        if self.pos >= self.len() {
            return;
        }
        let input = self.input;
        let tail = &input[self.pos..];
        if let Some(spec) = tables::lookup_at(tail.as_bytes(), 0) {
            self.push_error(
                self.pos,
                spec.code,
                ErrorKind::IncompleteTail,
                format!("Incomplete or invalid segment starting with AI {}", spec.code),
            );
        }
        debug!(position = self.pos, tail, "scan halted");
        self.result.raw_tail = Some(tail.to_string());
    }
}
