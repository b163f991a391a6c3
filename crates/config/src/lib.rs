//! Parser configuration for the GS1 toolchain.
//!
//! A configuration file is JSON (comments and trailing commas allowed):
//!
//! ```jsonc
//! {
//!   // "lenient" (default) or "strict"
//!   "mode": "strict",
//!   // "GS", "FNC1", or any single ASCII character
//!   "fnc1": "GS",
//! }
//! ```

use gs1_toolchain_core::{GS, Mode, ParseOptions};
use gs1_toolchain_jsonc_strip::strip_jsonc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON deserialization failed.
    #[error("invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value is not acceptable.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// Parser settings as written in a configuration file.
///
/// Every field is optional so that layers can be overlaid: command-line
/// flags on top of a file on top of the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Error policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Separator name or literal character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fnc1: Option<String>,
}

impl ParserConfig {
    /// Values from `higher` win; unset fields fall through to `self`.
    pub fn overlay(self, higher: ParserConfig) -> ParserConfig {
        ParserConfig {
            mode: higher.mode.or(self.mode),
            fnc1: higher.fnc1.or(self.fnc1),
        }
    }

    /// Resolve into parse options.
    pub fn to_options(&self) -> Result<ParseOptions, ConfigError> {
        let fnc1 = self.fnc1.as_deref().map(parse_fnc1).transpose()?;
        Ok(ParseOptions {
            mode: self.mode.unwrap_or_default(),
            fnc1,
        })
    }
}

/// Interpret a separator setting.
///
/// Accepts the names `GS` and `FNC1` (both the ASCII group separator,
/// case-insensitive) or exactly one ASCII character that cannot occur in a
/// payload (letters and digits are refused).
pub fn parse_fnc1(value: &str) -> Result<char, ConfigError> {
    if value.eq_ignore_ascii_case("gs") || value.eq_ignore_ascii_case("fnc1") {
        return Ok(GS);
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Err(ConfigError::InvalidField {
            field: "fnc1".into(),
            reason: format!("{c:?} can appear in payloads and cannot delimit fields"),
        }),
        (Some(c), None) if c.is_ascii() => Ok(c),
        (Some(c), None) => Err(ConfigError::InvalidField {
            field: "fnc1".into(),
            reason: format!("{c:?} is not an ASCII character"),
        }),
        (None, _) => Err(ConfigError::InvalidField {
            field: "fnc1".into(),
            reason: "must not be empty".into(),
        }),
        _ => Err(ConfigError::InvalidField {
            field: "fnc1".into(),
            reason: format!("expected \"GS\", \"FNC1\" or a single character, got {value:?}"),
        }),
    }
}

/// Parse and validate a configuration from a JSON or JSONC string.
pub fn load_config_from_str(s: &str) -> Result<ParserConfig, ConfigError> {
    let config: ParserConfig = serde_json::from_str(&strip_jsonc(s))?;

    if let Some(ref sep) = config.fnc1 {
        parse_fnc1(sep)?;
    }
    Ok(config)
}
