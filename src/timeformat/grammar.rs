// ABOUTME: Fixed-width grammar matchers for SMPP (YYMMDDhhmmsstnnp) and delivery receipt (YYMMDDhhmm) timestamps
// ABOUTME: Splits validated input into numeric fields; no calendar interpretation happens here

use crate::timeformat::error::{TimeFormatError, TimeFormatResult};
use num_enum::TryFromPrimitive;
use std::fmt;

/// Length of an SMPP absolute or relative timestamp
pub const SMPP_TIMESTAMP_LEN: usize = 16;

/// Length of the canonical `YYMMDDhhmm` delivery receipt timestamp
pub const DLR_TIMESTAMP_LEN: usize = 10;

/// Length of the `YYMMDDhhmmss` delivery receipt extension
pub const DLR_TIMESTAMP_WITH_SECONDS_LEN: usize = 12;

/// The `p` character closing an SMPP timestamp
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// `R`: the fields describe an elapsed duration
    Relative = 0x52,
    /// `+`: local time is ahead of UTC
    Ahead = 0x2B,
    /// `-`: local time is behind UTC
    Behind = 0x2D,
}

impl Terminator {
    pub fn as_char(self) -> char {
        self as u8 as char
    }

    pub fn is_relative(self) -> bool {
        self == Terminator::Relative
    }
}

/// The nine captures of an SMPP timestamp
///
/// ```text
/// YY MM DD hh mm ss t nn p
/// 2  2  2  2  2  2  1 2  1
/// ```
///
/// For absolute timestamps the first six fields are a calendar date and time
/// and `offset_quarters` is the distance from UTC in 15 minute units. For
/// relative timestamps they are counts of pseudo-calendar units and
/// `offset_quarters` is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SmppFields {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub tenth: u8,
    pub offset_quarters: u8,
    pub terminator: Terminator,
}

impl SmppFields {
    /// Matches `input` against `^\d{2}\d{2}\d{2}\d{2}\d{2}\d{2}\d\d{2}[R+-]$`
    pub fn parse(input: &str) -> TimeFormatResult<Self> {
        let bytes = input.as_bytes();
        if bytes.len() != SMPP_TIMESTAMP_LEN {
            return Err(TimeFormatError::malformed(input, "expected 16 characters"));
        }

        let (digits, terminator) = bytes.split_at(SMPP_TIMESTAMP_LEN - 1);
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(TimeFormatError::malformed(
                input,
                "positions 0-14 must be digits",
            ));
        }
        let terminator = Terminator::try_from(terminator[0])
            .map_err(|_| TimeFormatError::malformed(input, "terminator must be R, + or -"))?;

        Ok(Self {
            year: two_digits(input, &digits[0..2])?,
            month: two_digits(input, &digits[2..4])?,
            day: two_digits(input, &digits[4..6])?,
            hour: two_digits(input, &digits[6..8])?,
            minute: two_digits(input, &digits[8..10])?,
            second: two_digits(input, &digits[10..12])?,
            tenth: one_digit(input, digits[12])?,
            offset_quarters: two_digits(input, &digits[13..15])?,
            terminator,
        })
    }

    pub fn is_relative(&self) -> bool {
        self.terminator.is_relative()
    }
}

impl fmt::Display for SmppFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{:02}{:02}{:02}{:02}{:02}{}{:02}{}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.tenth,
            self.offset_quarters,
            self.terminator.as_char()
        )
    }
}

/// Fields of a delivery receipt `submit date` / `done date` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DlrFields {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// Present only in the 12 digit form
    pub second: Option<u8>,
}

impl DlrFields {
    /// Matches `^\d{10}$` or `^\d{12}$`
    pub fn parse(input: &str) -> TimeFormatResult<Self> {
        let bytes = input.as_bytes();
        if bytes.len() != DLR_TIMESTAMP_LEN && bytes.len() != DLR_TIMESTAMP_WITH_SECONDS_LEN {
            return Err(TimeFormatError::malformed(
                input,
                "expected 10 or 12 digits",
            ));
        }
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(TimeFormatError::malformed(input, "expected only digits"));
        }

        let second = match bytes.get(10..12) {
            Some(ss) => Some(two_digits(input, ss)?),
            None => None,
        };

        Ok(Self {
            year: two_digits(input, &bytes[0..2])?,
            month: two_digits(input, &bytes[2..4])?,
            day: two_digits(input, &bytes[4..6])?,
            hour: two_digits(input, &bytes[6..8])?,
            minute: two_digits(input, &bytes[8..10])?,
            second,
        })
    }
}

fn two_digits(input: &str, bytes: &[u8]) -> TimeFormatResult<u8> {
    match bytes {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => Ok((tens - b'0') * 10 + (ones - b'0')),
        _ => Err(TimeFormatError::malformed(input, "non-numeric field")),
    }
}

fn one_digit(input: &str, byte: u8) -> TimeFormatResult<u8> {
    if byte.is_ascii_digit() {
        Ok(byte - b'0')
    } else {
        Err(TimeFormatError::malformed(input, "non-numeric field"))
    }
}
