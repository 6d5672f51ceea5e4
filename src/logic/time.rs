//! Race time strings (`MM:SS.F`) to milliseconds.

use thiserror::Error;

/// A time string that could not be read.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TimeParseError {
    #[error("invalid time {0:?}: missing ':' between minutes and seconds")]
    MissingMinutes(String),
    #[error("invalid time {0:?}: missing '.' after seconds")]
    MissingSeconds(String),
    #[error("invalid time {0:?}: minutes and seconds must be integers")]
    InvalidNumber(String),
    #[error("invalid time {0:?}: expected a digit after '.'")]
    MissingFraction(String),
    #[error("invalid time {0:?}: too large to represent in milliseconds")]
    OutOfRange(String),
}

/// Parse `MM:SS.F` into milliseconds as `minutes * 60000 + seconds * 1000 + F`.
///
/// Only the first digit after the `.` is read, and it is added as a plain
/// millisecond count (so `"1:59.99"` is 119009, not 119990). Surrounding
/// whitespace is ignored.
pub fn parse_time(raw: &str) -> Result<u64, TimeParseError> {
    let s = raw.trim();
    let (minutes, rest) = s
        .split_once(':')
        .ok_or_else(|| TimeParseError::MissingMinutes(raw.to_string()))?;
    let (seconds, fraction) = rest
        .split_once('.')
        .ok_or_else(|| TimeParseError::MissingSeconds(raw.to_string()))?;

    let minutes: u64 = minutes
        .parse()
        .map_err(|_| TimeParseError::InvalidNumber(raw.to_string()))?;
    let seconds: u64 = seconds
        .parse()
        .map_err(|_| TimeParseError::InvalidNumber(raw.to_string()))?;
    let tenths = fraction
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| TimeParseError::MissingFraction(raw.to_string()))?;

    minutes
        .checked_mul(60_000)
        .and_then(|ms| seconds.checked_mul(1_000).and_then(|s| ms.checked_add(s)))
        .and_then(|ms| ms.checked_add(u64::from(tenths)))
        .ok_or_else(|| TimeParseError::OutOfRange(raw.to_string()))
}
