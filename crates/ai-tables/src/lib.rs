//! GS1 application identifier (AI) dictionary.
//!
//! A process-wide, read-only table describing every AI the parser
//! recognises: its semantic name, whether its payload has a fixed or
//! variable length, which characters it may contain, and whether it carries
//! a `YYMMDD` date. The parser, the lookahead scanner, and the CLI's `ais`
//! listing all read from [`AI_TABLE`].
//!
//! Only AIs that appear on clinic product labels are listed. Every extra
//! two-digit code widens the set of coincidental matches inside batch and
//! serial payloads, so AI `91` (company internal) is intentionally absent.

#![warn(missing_docs)]

use serde::Serialize;

/// Maximum payload length assumed for variable-length AIs.
pub const DEFAULT_MAX_LENGTH: usize = 20;

/// Well-known AI codes.
pub mod ai {
    /// Global Trade Item Number (14 digits).
    pub const GTIN: &str = "01";
    /// Batch or lot number.
    pub const BATCH: &str = "10";
    /// Production date (`YYMMDD`).
    pub const PROD_DATE: &str = "11";
    /// Expiration date (`YYMMDD`).
    pub const EXPIRY: &str = "17";
    /// Serial number.
    pub const SERIAL: &str = "21";
    /// Count of items (variable measure trade items).
    pub const COUNT: &str = "30";
}

/// How the end of an AI's payload is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LengthKind {
    /// Payload is exactly `length` characters.
    Fixed {
        /// Required payload length.
        length: usize,
    },
    /// Payload is 1 to `max_length` characters and ends at a separator or
    /// at the next plausible AI.
    Variable {
        /// Longest permitted payload.
        max_length: usize,
    },
}

/// Character class a payload must belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// ASCII digits only.
    Numeric,
    /// ASCII letters and digits only.
    Alphanumeric,
}

impl DataType {
    /// Whether `b` belongs to this character class.
    pub fn accepts(self, b: u8) -> bool {
        match self {
            DataType::Numeric => b.is_ascii_digit(),
            DataType::Alphanumeric => b.is_ascii_alphanumeric(),
        }
    }

    /// Lowercase label used in messages (`"numeric"`, `"alphanumeric"`).
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Numeric => "numeric",
            DataType::Alphanumeric => "alphanumeric",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiSpec {
    /// Two ASCII digits, e.g. `"17"`.
    pub code: &'static str,
    /// Semantic label, e.g. `"EXPIRY"`.
    pub name: &'static str,
    /// Fixed or variable payload length.
    pub length: LengthKind,
    /// Allowed payload characters.
    pub data_type: DataType,
    /// Payload is a `YYMMDD` date.
    pub is_date: bool,
}

impl AiSpec {
    const fn fixed(code: &'static str, name: &'static str, length: usize, is_date: bool) -> Self {
        Self {
            code,
            name,
            length: LengthKind::Fixed { length },
            data_type: DataType::Numeric,
            is_date,
        }
    }

    const fn variable(
        code: &'static str,
        name: &'static str,
        max_length: usize,
        data_type: DataType,
    ) -> Self {
        Self {
            code,
            name,
            length: LengthKind::Variable { max_length },
            data_type,
            is_date: false,
        }
    }

    /// Required payload length for fixed AIs, `None` for variable ones.
    pub fn fixed_length(&self) -> Option<usize> {
        match self.length {
            LengthKind::Fixed { length } => Some(length),
            LengthKind::Variable { .. } => None,
        }
    }

    /// Longest payload this AI can carry.
    pub fn max_length(&self) -> usize {
        match self.length {
            LengthKind::Fixed { length } => length,
            LengthKind::Variable { max_length } => max_length,
        }
    }

    /// Whether the payload length is variable.
    pub fn is_variable(&self) -> bool {
        matches!(self.length, LengthKind::Variable { .. })
    }
}

/// Every application identifier the parser recognises, ordered by code.
pub static AI_TABLE: &[AiSpec] = &[
    AiSpec::fixed(ai::GTIN, "GTIN", 14, false),
    AiSpec::variable(ai::BATCH, "BATCH", DEFAULT_MAX_LENGTH, DataType::Alphanumeric),
    AiSpec::fixed(ai::PROD_DATE, "PROD_DATE", 6, true),
    AiSpec::fixed(ai::EXPIRY, "EXPIRY", 6, true),
    AiSpec::variable(ai::SERIAL, "SERIAL", DEFAULT_MAX_LENGTH, DataType::Alphanumeric),
    AiSpec::variable(ai::COUNT, "COUNT", 8, DataType::Numeric),
];

/// Look up an AI by its two-character code.
pub fn lookup(code: &str) -> Option<&'static AiSpec> {
    AI_TABLE.iter().find(|spec| spec.code == code)
}

/// Look up the AI whose code is the two bytes at `pos` in `input`.
///
/// Returns `None` when fewer than two bytes remain or the pair is unknown.
pub fn lookup_at(input: &[u8], pos: usize) -> Option<&'static AiSpec> {
    let pair = input.get(pos..pos + 2)?;
    AI_TABLE
        .iter()
        .find(|spec| spec.code.as_bytes() == pair)
}

/// Whether `code` is a known AI.
pub fn is_known(code: &str) -> bool {
    lookup(code).is_some()
}
