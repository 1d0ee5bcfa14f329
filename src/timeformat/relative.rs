// ABOUTME: Relative (R-terminated) SMPP timestamps using the protocol's 365-day year / 30-day month approximation
// ABOUTME: Converts between wire fields and signed durations; the year field caps encodable durations at 99 years

use crate::timeformat::error::{TimeFormatError, TimeFormatResult};
use crate::timeformat::grammar::{SmppFields, Terminator};
use crate::timeformat::types::{SmppTimestamp, TimestampKind};
use chrono::{DateTime, TimeDelta, Utc};

pub const HOURS_PER_DAY: i64 = 24;
pub const HOURS_PER_MONTH: i64 = 30 * HOURS_PER_DAY;
pub const HOURS_PER_YEAR: i64 = 365 * HOURS_PER_DAY;

/// Largest year count the two digit `YY` field can carry
pub const MAX_RELATIVE_YEARS: i64 = 99;

/// Pseudo-calendar decomposition of an elapsed time
///
/// SMPP relative timestamps count elapsed time, not calendar dates, so every
/// year is 8760 hours and every month 720 hours. The breakdown is lossy with
/// respect to real calendars and only exists for the wire encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RelativeBreakdown {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl RelativeBreakdown {
    /// Reads the counts straight off a relative timestamp's fields
    pub fn from_fields(fields: &SmppFields) -> Self {
        Self {
            years: fields.year.into(),
            months: fields.month.into(),
            days: fields.day.into(),
            hours: fields.hour.into(),
            minutes: fields.minute.into(),
            seconds: fields.second.into(),
        }
    }

    /// Splits a non-negative duration into years, months, days and hours by
    /// repeated floor division of the whole hours; minutes and seconds are
    /// the remainder within the last hour. Sub-second parts are dropped.
    pub fn from_duration(duration: TimeDelta) -> TimeFormatResult<Self> {
        let total_seconds = duration.num_seconds();
        if total_seconds < 0 {
            return Err(TimeFormatError::NegativeDuration {
                seconds: total_seconds,
            });
        }

        let mut hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        let years = hours / HOURS_PER_YEAR;
        hours -= years * HOURS_PER_YEAR;
        let months = hours / HOURS_PER_MONTH;
        hours -= months * HOURS_PER_MONTH;
        let days = hours / HOURS_PER_DAY;
        hours -= days * HOURS_PER_DAY;

        Ok(Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        })
    }

    pub fn total_hours(&self) -> i64 {
        self.years * HOURS_PER_YEAR
            + self.months * HOURS_PER_MONTH
            + self.days * HOURS_PER_DAY
            + self.hours
    }

    pub fn total_seconds(&self) -> i64 {
        let total_minutes = self.total_hours() * 60 + self.minutes;
        total_minutes * 60 + self.seconds
    }

    pub fn to_duration(&self) -> TimeFormatResult<TimeDelta> {
        TimeDelta::try_seconds(self.total_seconds()).ok_or(TimeFormatError::DurationOverflow {
            years: self.years,
        })
    }

    /// Builds the wire fields: tenths `0`, reserved offset `00`, terminator `R`
    pub fn to_fields(&self) -> TimeFormatResult<SmppFields> {
        if self.years > MAX_RELATIVE_YEARS {
            return Err(TimeFormatError::DurationOverflow { years: self.years });
        }

        let field = |value: i64| {
            u8::try_from(value).map_err(|_| TimeFormatError::DurationOverflow { years: self.years })
        };

        Ok(SmppFields {
            year: field(self.years)?,
            month: field(self.months)?,
            day: field(self.days)?,
            hour: field(self.hours)?,
            minute: field(self.minutes)?,
            second: field(self.seconds)?,
            tenth: 0,
            offset_quarters: 0,
            terminator: Terminator::Relative,
        })
    }
}

/// Decodes relative fields against `now`
pub(crate) fn decode(fields: &SmppFields, now: DateTime<Utc>) -> TimeFormatResult<SmppTimestamp> {
    let breakdown = RelativeBreakdown::from_fields(fields);
    let duration = breakdown.to_duration()?;
    let instant = now
        .checked_add_signed(duration)
        .ok_or(TimeFormatError::DurationOverflow {
            years: breakdown.years,
        })?;

    Ok(SmppTimestamp {
        instant,
        duration,
        kind: TimestampKind::Relative,
    })
}

/// Encodes a duration as a relative SMPP timestamp, `YYMMDDhhmmss000R`
///
/// Fails with [`TimeFormatError::DurationOverflow`] when the duration needs
/// more than 99 pseudo-calendar years. No attempt is made to carry excess
/// years into the month field.
///
/// Relative timestamps only point forward, so a negative duration fails with
/// [`TimeFormatError::NegativeDuration`] carrying the signed second count.
pub fn format_relative_duration(duration: TimeDelta) -> TimeFormatResult<String> {
    let fields = RelativeBreakdown::from_duration(duration)?.to_fields()?;
    Ok(fields.to_string())
}
