//! Payload validation for individual AI segments.
//!
//! [`validate_segment`] checks length and character class against an
//! [`AiSpec`]. Date semantics are handled separately by [`date`].

/// `YYMMDD` date conversion.
pub mod date;

use gs1_toolchain_ai_tables::{AiSpec, DataType, LengthKind};
use thiserror::Error;

use crate::decode::ErrorKind;

/// Why a payload failed [`validate_segment`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentIssue {
    /// Fixed-length payload with the wrong number of characters.
    #[error("Length mismatch: expected {expected} characters, got {actual}")]
    LengthMismatch {
        /// Required length.
        expected: usize,
        /// Length found.
        actual: usize,
    },
    /// Variable-length payload that is empty or too long.
    #[error("Length out of range: got {actual} characters, allowed 1-{max}")]
    LengthOutOfRange {
        /// Length found.
        actual: usize,
        /// Maximum allowed.
        max: usize,
    },
    /// Character outside the AI's data type.
    #[error("Invalid character {ch:?} at offset {offset} in {data_type} payload")]
    InvalidCharacter {
        /// The AI's declared type.
        data_type: DataType,
        /// First offending character.
        ch: char,
        /// Its byte offset within the payload.
        offset: usize,
    },
}

impl SegmentIssue {
    /// The parser error kind this issue is reported as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SegmentIssue::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            SegmentIssue::LengthOutOfRange { .. } => ErrorKind::LengthOutOfRange,
            SegmentIssue::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
        }
    }
}

/// Check `payload` against the length and character constraints of `spec`.
///
/// Length is checked before characters, so an over-long payload with bad
/// characters reports the length problem.
pub fn validate_segment(payload: &str, spec: &AiSpec) -> Result<(), SegmentIssue> {
    let actual = payload.len();
    match spec.length {
        LengthKind::Fixed { length } if actual != length => {
            return Err(SegmentIssue::LengthMismatch {
                expected: length,
                actual,
            });
        }
        LengthKind::Variable { max_length } if actual == 0 || actual > max_length => {
            return Err(SegmentIssue::LengthOutOfRange {
                actual,
                max: max_length,
            });
        }
        _ => {}
    }

    let bad = payload
        .char_indices()
        .find(|&(_, ch)| !ch.is_ascii() || !spec.data_type.accepts(ch as u8));
    match bad {
        Some((offset, ch)) => Err(SegmentIssue::InvalidCharacter {
            data_type: spec.data_type,
            ch,
            offset,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs1_toolchain_ai_tables::{ai, lookup};

    fn spec(code: &str) -> &'static AiSpec {
        lookup(code).unwrap()
    }

    #[test]
    fn fixed_length_exact() {
        assert!(validate_segment("09506000134352", spec(ai::GTIN)).is_ok());
        assert_eq!(
            validate_segment("0950600013435", spec(ai::GTIN)),
            Err(SegmentIssue::LengthMismatch {
                expected: 14,
                actual: 13
            })
        );
    }

    #[test]
    fn mismatch_message_names_both_lengths() {
        let err = validate_segment("2401", spec(ai::EXPIRY)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('6') && msg.contains('4'), "{msg}");
    }

    #[test]
    fn variable_length_bounds() {
        assert!(validate_segment("A", spec(ai::BATCH)).is_ok());
        assert!(validate_segment(&"A".repeat(20), spec(ai::BATCH)).is_ok());
        assert_eq!(
            validate_segment("", spec(ai::BATCH)).unwrap_err().kind(),
            ErrorKind::LengthOutOfRange
        );
        assert_eq!(
            validate_segment(&"A".repeat(21), spec(ai::BATCH)),
            Err(SegmentIssue::LengthOutOfRange {
                actual: 21,
                max: 20
            })
        );
        assert!(validate_segment("123456789", spec(ai::COUNT)).is_err());
    }

    #[test]
    fn numeric_rejects_letters() {
        assert_eq!(
            validate_segment("24A101", spec(ai::EXPIRY)),
            Err(SegmentIssue::InvalidCharacter {
                data_type: DataType::Numeric,
                ch: 'A',
                offset: 2
            })
        );
    }

    #[test]
    fn alphanumeric_rejects_punctuation() {
        assert!(validate_segment("LOT42a", spec(ai::BATCH)).is_ok());
        let err = validate_segment("LOT-42", spec(ai::BATCH)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
        assert!(err.to_string().contains("'-'"), "{err}");
    }

    #[test]
    fn non_ascii_is_rejected() {
        let err = validate_segment("LOT번호", spec(ai::BATCH)).unwrap_err();
        assert!(matches!(
            err,
            SegmentIssue::InvalidCharacter { offset: 3, .. }
        ));
    }

    #[test]
    fn accepts_invalid_calendar_dates() {
        // Calendar checks belong to the date converter.
        assert!(validate_segment("241399", spec(ai::EXPIRY)).is_ok());
    }
}
