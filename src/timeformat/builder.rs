// ABOUTME: Builder for configuring the time codec's clock and delivery receipt time zone
// ABOUTME: Defaults match the free functions: system clock, local zone for receipt dates

use crate::timeformat::TimeFormat;
use crate::timeformat::clock::{Clock, SystemClock};
use crate::timeformat::dlr::DlrTimeZone;

/// Builder pattern for [`TimeFormat`] configuration
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use smpp_timeformat::{DlrTimeZone, FixedClock, TimeFormat};
///
/// let now = Utc.with_ymd_and_hms(2024, 7, 12, 12, 0, 0).unwrap();
/// let codec = TimeFormat::builder()
///     .clock(FixedClock::at(now))
///     .dlr_time_zone(DlrTimeZone::Utc)
///     .build();
///
/// let ts = codec.parse_smpp_timestamp("000002000000000R").unwrap();
/// assert_eq!(ts.instant, Utc.with_ymd_and_hms(2024, 7, 14, 12, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct TimeFormatBuilder<C = SystemClock> {
    clock: C,
    dlr_time_zone: DlrTimeZone,
}

impl Default for TimeFormatBuilder<SystemClock> {
    fn default() -> Self {
        Self {
            clock: SystemClock,
            dlr_time_zone: DlrTimeZone::default(),
        }
    }
}

impl TimeFormatBuilder<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> TimeFormatBuilder<C> {
    /// Replace the clock used to derive durations and instants
    pub fn clock<N: Clock>(self, clock: N) -> TimeFormatBuilder<N> {
        TimeFormatBuilder {
            clock,
            dlr_time_zone: self.dlr_time_zone,
        }
    }

    /// Set the zone delivery receipt dates are interpreted in
    pub fn dlr_time_zone(mut self, zone: DlrTimeZone) -> Self {
        self.dlr_time_zone = zone;
        self
    }

    pub fn build(self) -> TimeFormat<C> {
        TimeFormat::from_parts(self.clock, self.dlr_time_zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeformat::clock::FixedClock;
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn test_defaults() {
        let codec = TimeFormatBuilder::new().build();
        assert_eq!(codec.dlr_time_zone(), DlrTimeZone::Local);
    }

    #[test]
    fn test_overrides() {
        let now = Utc.with_ymd_and_hms(2011, 10, 19, 8, 0, 0).unwrap();
        let zone = DlrTimeZone::Fixed(FixedOffset::west_opt(3 * 3600).unwrap());
        let codec = TimeFormatBuilder::new()
            .dlr_time_zone(zone)
            .clock(FixedClock::at(now))
            .build();

        assert_eq!(codec.dlr_time_zone(), zone);
        assert_eq!(codec.clock().now(), now);
    }
}
