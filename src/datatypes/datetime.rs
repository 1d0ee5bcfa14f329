// ABOUTME: Strongly-typed SMPP schedule_delivery_time / validity_period field values
// ABOUTME: Validated against the YYMMDDhhmmsstnnp grammar and resolved through the time codec

use crate::timeformat::{
    self, Clock, SmppFields, SmppTimestamp, TimeFormat, TimeFormatError, TimeFormatResult,
    absolute,
};
use chrono::{DateTime, TimeDelta, TimeZone};
use std::fmt;
use std::str::{self, FromStr};

/// A strongly-typed SMPP date/time in YYMMDDhhmmsstnnp format
///
/// An empty value means "immediate" for `schedule_delivery_time` and "SMSC
/// default" for `validity_period`. A non-empty value is always a
/// grammatically valid 16 character timestamp; absolute values additionally
/// name a real calendar date and time.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SmppDateTime {
    data: [u8; 16], // 16 chars exactly, no null terminator needed
    is_empty: bool, // Track if this represents "immediate" (empty) time
}

impl SmppDateTime {
    /// Creates a new SmppDateTime with full format validation
    pub fn new(datetime_str: &str) -> TimeFormatResult<Self> {
        if datetime_str.is_empty() {
            return Ok(Self::immediate());
        }

        let fields = SmppFields::parse(datetime_str)?;
        if !fields.is_relative() {
            absolute::validate(&fields)?;
        }

        let mut data = [0u8; 16];
        data.copy_from_slice(datetime_str.as_bytes());

        Ok(Self {
            data,
            is_empty: false,
        })
    }

    /// Creates an "immediate" delivery time (empty)
    pub fn immediate() -> Self {
        Self {
            data: [0u8; 16],
            is_empty: true,
        }
    }

    /// Creates a relative time `duration` from now
    pub fn from_duration(duration: TimeDelta) -> TimeFormatResult<Self> {
        Self::new(&timeformat::format_relative_duration(duration)?)
    }

    /// Creates an absolute time in the instant's own UTC offset
    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> TimeFormatResult<Self> {
        Self::new(&timeformat::format_absolute_instant(instant)?)
    }

    /// Returns true if this represents immediate delivery (empty time)
    pub fn is_immediate(&self) -> bool {
        self.is_empty
    }

    pub fn is_relative(&self) -> bool {
        self.fields().is_some_and(|fields| fields.is_relative())
    }

    /// Returns the parsed wire fields, `None` when immediate
    pub fn fields(&self) -> Option<SmppFields> {
        if self.is_empty {
            None
        } else {
            SmppFields::parse(self.as_str()).ok()
        }
    }

    /// Decodes the value with `codec`, `None` when immediate
    pub fn resolve<C: Clock>(
        &self,
        codec: &TimeFormat<C>,
    ) -> TimeFormatResult<Option<SmppTimestamp>> {
        if self.is_empty {
            return Ok(None);
        }
        codec.parse_smpp_timestamp(self.as_str()).map(Some)
    }

    /// Returns the datetime as a string slice
    pub fn as_str(&self) -> &str {
        if self.is_empty {
            ""
        } else {
            // only ASCII is ever stored
            str::from_utf8(&self.data).unwrap_or_default()
        }
    }

    /// Returns the datetime as bytes
    pub fn as_bytes(&self) -> &[u8] {
        if self.is_empty { &[] } else { &self.data }
    }

    /// Returns the length of the datetime string (0 for immediate, 16 for set time)
    pub fn len(&self) -> usize {
        if self.is_empty { 0 } else { 16 }
    }

    /// Returns true if this is an immediate delivery time
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }
}

// SMPP-specific datetime type aliases
pub type ScheduleDeliveryTime = SmppDateTime;
pub type ValidityPeriod = SmppDateTime;

// Default implementation (immediate delivery)
impl Default for SmppDateTime {
    fn default() -> Self {
        Self::immediate()
    }
}

impl fmt::Display for SmppDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty {
            write!(f, "immediate")
        } else {
            write!(f, "{}", self.as_str())
        }
    }
}

impl fmt::Debug for SmppDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty {
            write!(f, "SmppDateTime::immediate()")
        } else {
            write!(f, "SmppDateTime(\"{}\")", self.as_str())
        }
    }
}

impl AsRef<[u8]> for SmppDateTime {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq<str> for SmppDateTime {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for SmppDateTime {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl FromStr for SmppDateTime {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SmppDateTime {
    type Error = TimeFormatError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for SmppDateTime {
    type Error = TimeFormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}
