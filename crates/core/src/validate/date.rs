//! `YYMMDD` date conversion for date-flagged application identifiers.
//!
//! Two-digit years are placed in a 100-year window: `00`–`49` map to
//! 2000–2049 and `50`–`99` to 1950–1999. Calendar validity (days per month,
//! Gregorian leap years) is checked with [`chrono::NaiveDate`].

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Two-digit years below this value belong to the 2000s.
pub const CENTURY_PIVOT: u32 = 50;

/// Reasons a `YYMMDD` payload is not a valid date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Not exactly six ASCII digits.
    #[error("Invalid format")]
    InvalidFormat,
    /// Month outside `01`–`12`.
    #[error("Invalid month {month:02} (expected 01-12)")]
    InvalidMonth {
        /// The month digits as read.
        month: u32,
    },
    /// Day outside `01`–`31`.
    #[error("Invalid day {day:02} (expected 01-31)")]
    DayOutOfRange {
        /// The day digits as read.
        day: u32,
    },
    /// Day does not exist in the given month.
    #[error("Invalid day {day:02} for {year:04}-{month:02} (month has {max_day} days)")]
    NotInMonth {
        /// Four-digit year after century inference.
        year: i32,
        /// Month (1-12).
        month: u32,
        /// Requested day.
        day: u32,
        /// Last day of that month.
        max_day: u32,
    },
}

/// Expand a two-digit year using the fixed century pivot.
pub fn expand_year(yy: u32) -> i32 {
    let century = if yy < CENTURY_PIVOT { 2000 } else { 1900 };
    century + yy as i32
}

/// Convert a `YYMMDD` string into an ISO `YYYY-MM-DD` date.
///
/// ```
/// use gs1_toolchain_core::convert_date;
///
/// assert_eq!(convert_date("240101").unwrap(), "2024-01-01");
/// assert_eq!(convert_date("991231").unwrap(), "1999-12-31");
/// assert!(convert_date("230229").is_err());
/// ```
pub fn convert_date(yymmdd: &str) -> Result<String, DateError> {
    let b = yymmdd.as_bytes();
    if b.len() != 6 || !b.iter().all(u8::is_ascii_digit) {
        return Err(DateError::InvalidFormat);
    }
    let pair = |i: usize| u32::from(b[i] - b'0') * 10 + u32::from(b[i + 1] - b'0');
    let (yy, month, day) = (pair(0), pair(2), pair(4));

    if !(1..=12).contains(&month) {
        return Err(DateError::InvalidMonth { month });
    }
    if !(1..=31).contains(&day) {
        return Err(DateError::DayOutOfRange { day });
    }

    let year = expand_year(yy);
    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::NotInMonth {
            year,
            month,
            day,
            max_day: days_in_month(year, month),
        })?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
        .unwrap_or(28)
}

/// Serializable `{date, valid, error}` view of a conversion, for JSON and
/// JavaScript callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateConversion {
    /// ISO date, empty when invalid.
    pub date: String,
    /// Whether the conversion succeeded.
    pub valid: bool,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<String, DateError>> for DateConversion {
    fn from(res: Result<String, DateError>) -> Self {
        match res {
            Ok(date) => Self {
                date,
                valid: true,
                error: None,
            },
            Err(e) => Self {
                date: String::new(),
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn century_window() {
        assert_eq!(expand_year(0), 2000);
        assert_eq!(expand_year(49), 2049);
        assert_eq!(expand_year(50), 1950);
        assert_eq!(expand_year(99), 1999);
    }

    #[test]
    fn days_in_month_handles_leap_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn conversion_view() {
        let ok = DateConversion::from(convert_date("240101"));
        assert!(ok.valid);
        assert_eq!(ok.date, "2024-01-01");
        assert!(ok.error.is_none());

        let bad = DateConversion::from(convert_date("2401"));
        assert!(!bad.valid);
        assert!(bad.date.is_empty());
        assert_eq!(bad.error.as_deref(), Some("Invalid format"));
    }
}
