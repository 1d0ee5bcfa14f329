// ABOUTME: SMPP time codec converting between wire timestamps and chrono instants/durations
// ABOUTME: Dispatches R-terminated input to the relative decoder and +/- input to the absolute decoder

//! SMPP Time Format Module
//!
//! SMPP v3.4 (Section 7.1.1) carries `schedule_delivery_time` and
//! `validity_period` as 16 character strings of the form `YYMMDDhhmmsstnnp`:
//!
//! * **Absolute** (`p` is `+` or `-`): a calendar date and time, local to a
//!   UTC offset of `nn` quarter hours.
//! * **Relative** (`p` is `R`): an elapsed time where a year is 365 days and a
//!   month is 30 days.
//!
//! Delivery receipts use a separate `YYMMDDhhmm` form with no offset.
//!
//! Every decode yields both an instant and a duration, related through a
//! single read of the configured [`Clock`].
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::TimeDelta;
//! use smpp_timeformat::{format_relative_duration, parse_smpp_timestamp};
//!
//! let ts = parse_smpp_timestamp("000002000000000R").unwrap();
//! assert_eq!(ts.duration, TimeDelta::hours(48));
//!
//! let text = format_relative_duration(TimeDelta::hours(48)).unwrap();
//! assert_eq!(text, "000002000000000R");
//! ```

pub mod absolute;
pub mod builder;
pub mod clock;
pub mod dlr;
pub mod error;
pub mod grammar;
pub mod relative;
pub mod types;

pub use absolute::{format_absolute_instant, format_absolute_instant_at};
pub use builder::TimeFormatBuilder;
pub use clock::{Clock, FixedClock, SystemClock};
pub use dlr::DlrTimeZone;
pub use error::{TimeFormatError, TimeFormatResult};
pub use grammar::{DlrFields, SmppFields, Terminator};
pub use relative::{RelativeBreakdown, format_relative_duration};
pub use types::{SmppTimestamp, TimestampKind};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// A configured SMPP time codec
///
/// Holds no mutable state; decoding only reads the clock, so a shared
/// `TimeFormat` can be used from any number of threads when its clock allows.
#[derive(Debug, Clone, Default)]
pub struct TimeFormat<C = SystemClock> {
    clock: C,
    dlr_time_zone: DlrTimeZone,
}

impl TimeFormat<SystemClock> {
    /// System clock, local zone for delivery receipts
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TimeFormatBuilder<SystemClock> {
        TimeFormatBuilder::new()
    }
}

impl<C: Clock> TimeFormat<C> {
    pub(crate) fn from_parts(clock: C, dlr_time_zone: DlrTimeZone) -> Self {
        Self {
            clock,
            dlr_time_zone,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn dlr_time_zone(&self) -> DlrTimeZone {
        self.dlr_time_zone
    }

    pub fn with_dlr_time_zone(mut self, zone: DlrTimeZone) -> Self {
        self.dlr_time_zone = zone;
        self
    }

    /// Decodes a 16 character SMPP timestamp
    ///
    /// Absolute input yields the instant plus its distance from now; relative
    /// input yields the duration plus now shifted by it.
    pub fn parse_smpp_timestamp(&self, text: &str) -> TimeFormatResult<SmppTimestamp> {
        let fields = SmppFields::parse(text)?;
        let now = self.clock.now();

        match fields.terminator {
            Terminator::Relative => relative::decode(&fields, now),
            Terminator::Ahead | Terminator::Behind => absolute::decode(&fields, now),
        }
    }

    /// Decodes a delivery receipt `submit date` / `done date` value
    pub fn parse_dlr_timestamp(&self, text: &str) -> TimeFormatResult<DateTime<Utc>> {
        dlr::decode(text, self.dlr_time_zone)
    }

    pub fn format_relative_duration(&self, duration: TimeDelta) -> TimeFormatResult<String> {
        relative::format_relative_duration(duration)
    }

    pub fn format_absolute_instant<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
    ) -> TimeFormatResult<String> {
        absolute::format_absolute_instant(instant)
    }
}

/// Decodes an SMPP timestamp against the system clock
pub fn parse_smpp_timestamp(text: &str) -> TimeFormatResult<SmppTimestamp> {
    TimeFormat::new().parse_smpp_timestamp(text)
}

/// Decodes a delivery receipt timestamp in the local zone
pub fn parse_dlr_timestamp(text: &str) -> TimeFormatResult<DateTime<Utc>> {
    TimeFormat::new().parse_dlr_timestamp(text)
}
