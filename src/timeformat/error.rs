// ABOUTME: Error types for SMPP timestamp decoding and encoding
// ABOUTME: Every codec call either succeeds or fails with exactly one of these variants

use thiserror::Error;

/// Errors produced by the SMPP time codec
///
/// Decoding failures always surface as [`TimeFormatError::MalformedTimestamp`];
/// the remaining variants are raised only when encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    /// Input does not match the timestamp grammar or names an impossible date
    #[error("Timestamp \"{input}\" has the wrong format: {reason}")]
    MalformedTimestamp { input: String, reason: &'static str },

    /// Duration needs more than 99 pseudo-calendar years, or the resulting
    /// instant falls outside the representable range
    #[error("Time duration overflows: {years} years do not fit in two digits")]
    DurationOverflow { years: i64 },

    /// Relative timestamps cannot express time in the past
    #[error("Negative duration of {seconds}s cannot be encoded as a relative timestamp")]
    NegativeDuration { seconds: i64 },

    /// UTC offset is not a whole number of quarter hours
    #[error("UTC offset of {seconds}s is not a multiple of 15 minutes")]
    UnrepresentableOffset { seconds: i32 },

    /// Local year cannot be written as a two digit 20YY year
    #[error("Year {year} is outside 2000-2099")]
    YearOutOfRange { year: i32 },
}

impl TimeFormatError {
    pub(crate) fn malformed(input: &str, reason: &'static str) -> Self {
        TimeFormatError::MalformedTimestamp {
            input: input.to_string(),
            reason,
        }
    }

    /// Returns true for any decode-side failure
    pub fn is_malformed(&self) -> bool {
        matches!(self, TimeFormatError::MalformedTimestamp { .. })
    }
}

/// Result type alias for time codec operations
pub type TimeFormatResult<T> = Result<T, TimeFormatError>;
