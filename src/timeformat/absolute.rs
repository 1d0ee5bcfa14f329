// ABOUTME: Absolute (+/- terminated) SMPP timestamps with quarter-hour UTC offsets
// ABOUTME: Decodes wire fields into a UTC instant and encodes zoned instants back to the wire form

use crate::timeformat::error::{TimeFormatError, TimeFormatResult};
use crate::timeformat::grammar::{SmppFields, Terminator};
use crate::timeformat::types::{SmppTimestamp, TimestampKind};
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone,
    Timelike, Utc,
};

/// Years are written as `YY` and always read as 20YY
pub const CENTURY: i32 = 2000;

const SECONDS_PER_QUARTER_HOUR: i32 = 15 * 60;

/// Decodes absolute fields against `now`
///
/// The calendar fields are local time at the wire offset, so the instant is
/// the naive date-time minus the signed offset. The tenths digit is ignored.
pub(crate) fn decode(fields: &SmppFields, now: DateTime<Utc>) -> TimeFormatResult<SmppTimestamp> {
    let naive = naive_datetime(fields)?;
    let offset_seconds = decode_offset(fields)?;
    let instant = naive
        .and_utc()
        .checked_sub_signed(TimeDelta::seconds(offset_seconds.into()))
        .ok_or_else(|| invalid(fields, "instant out of range"))?;

    let duration = TimeDelta::seconds((instant - now).num_seconds());

    Ok(SmppTimestamp {
        instant,
        duration,
        kind: TimestampKind::Absolute { offset_seconds },
    })
}

/// Checks that absolute fields name a real date and time
pub(crate) fn validate(fields: &SmppFields) -> TimeFormatResult<()> {
    naive_datetime(fields)?;
    decode_offset(fields)?;
    Ok(())
}

fn naive_datetime(fields: &SmppFields) -> TimeFormatResult<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(
        CENTURY + i32::from(fields.year),
        fields.month.into(),
        fields.day.into(),
    )
    .ok_or_else(|| invalid(fields, "month or day out of range"))?;

    date.and_hms_opt(
        fields.hour.into(),
        fields.minute.into(),
        fields.second.into(),
    )
    .ok_or_else(|| invalid(fields, "hour, minute or second out of range"))
}

/// `nn` counts quarter hours: `nn / 4` hours and `(nn % 4) * 15` minutes
///
/// Every `nn` up to 99 is accepted, so the result may exceed a day.
fn decode_offset(fields: &SmppFields) -> TimeFormatResult<i32> {
    let quarters = i32::from(fields.offset_quarters);
    let hours = quarters / 4;
    let minutes = (quarters % 4) * 15;
    let magnitude = hours * 3600 + minutes * 60;

    match fields.terminator {
        Terminator::Ahead => Ok(magnitude),
        Terminator::Behind => Ok(-magnitude),
        Terminator::Relative => Err(invalid(fields, "relative timestamp has no offset")),
    }
}

fn invalid(fields: &SmppFields, reason: &'static str) -> TimeFormatError {
    TimeFormatError::malformed(&fields.to_string(), reason)
}

/// Encodes an instant as an absolute SMPP timestamp in its own UTC offset
///
/// The calendar fields are the local time at that offset, the tenths digit is
/// taken from the sub-second part and `nn`/`p` carry the offset. A
/// `DateTime<Utc>` is written with offset `00+`.
///
/// # Example
///
/// ```rust
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use smpp_timeformat::format_absolute_instant;
///
/// let cest = FixedOffset::east_opt(2 * 3600).unwrap();
/// let instant = Utc.with_ymd_and_hms(2011, 10, 19, 7, 30, 0).unwrap();
/// let text = format_absolute_instant(&instant.with_timezone(&cest)).unwrap();
/// assert_eq!(text, "111019093000008+");
/// ```
pub fn format_absolute_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> TimeFormatResult<String> {
    let offset_seconds = instant.offset().fix().local_minus_utc();
    let fields = encode_fields(&instant.naive_local(), offset_seconds)?;
    Ok(fields.to_string())
}

/// Encodes a UTC instant as seen from `offset`
pub fn format_absolute_instant_at(
    instant: DateTime<Utc>,
    offset: FixedOffset,
) -> TimeFormatResult<String> {
    format_absolute_instant(&instant.with_timezone(&offset))
}

fn encode_fields(local: &NaiveDateTime, offset_seconds: i32) -> TimeFormatResult<SmppFields> {
    if offset_seconds % SECONDS_PER_QUARTER_HOUR != 0 {
        return Err(TimeFormatError::UnrepresentableOffset {
            seconds: offset_seconds,
        });
    }

    let year = local.year();
    let yy = year - CENTURY;
    if !(0..=99).contains(&yy) {
        return Err(TimeFormatError::YearOutOfRange { year });
    }

    // chrono offsets are below 24h, so at most 95 quarters
    let quarters = (offset_seconds.abs() / SECONDS_PER_QUARTER_HOUR) as u8;
    let terminator = if offset_seconds < 0 {
        Terminator::Behind
    } else {
        Terminator::Ahead
    };
    // leap seconds report nanoseconds above 1e9
    let tenth = (local.nanosecond() / 100_000_000).min(9) as u8;

    Ok(SmppFields {
        year: yy as u8,
        month: local.month() as u8,
        day: local.day() as u8,
        hour: local.hour() as u8,
        minute: local.minute() as u8,
        second: local.second() as u8,
        tenth,
        offset_quarters: quarters,
        terminator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2011, 10, 19, 8, 0, 0).unwrap()
    }

    fn decode_str(input: &str) -> TimeFormatResult<SmppTimestamp> {
        decode(&SmppFields::parse(input)?, now())
    }

    fn offset(minutes: i32) -> FixedOffset {
        FixedOffset::east_opt(minutes * 60).unwrap()
    }

    #[test]
    fn test_decode_half_hour_ahead() {
        let ts = decode_str("111019080000002+").unwrap();
        assert_eq!(ts.instant, Utc.with_ymd_and_hms(2011, 10, 19, 7, 30, 0).unwrap());
        assert_eq!(ts.offset(), Some(offset(30)));
        assert_eq!(ts.offset().unwrap().local_minus_utc(), 30 * 60);

        let local = ts.local_time().unwrap();
        assert_eq!(local.hour(), 8);
        assert_eq!(local.minute(), 0);
    }

    #[test]
    fn test_decode_seventeen_quarters() {
        let ts = decode_str("111019080000017+").unwrap();
        assert_eq!(ts.offset().unwrap().local_minus_utc(), 4 * 3600 + 15 * 60);
        assert_eq!(ts.instant, Utc.with_ymd_and_hms(2011, 10, 19, 3, 45, 0).unwrap());
    }

    #[test]
    fn test_decode_behind_utc() {
        let ts = decode_str("111019080000004-").unwrap();
        assert_eq!(ts.offset().unwrap().local_minus_utc(), -3600);
        assert_eq!(ts.instant, Utc.with_ymd_and_hms(2011, 10, 19, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_duration_relative_to_now() {
        // 07:30 UTC decoded at 08:00 UTC is half an hour in the past
        let past = decode_str("111019080000002+").unwrap();
        assert_eq!(past.duration, TimeDelta::minutes(-30));

        let future = decode_str("111020080000000+").unwrap();
        assert_eq!(future.duration, TimeDelta::days(1));
    }

    #[test]
    fn test_decode_ignores_tenths() {
        let with_tenths = decode_str("111019103011900+").unwrap();
        let without = decode_str("111019103011000+").unwrap();
        assert_eq!(with_tenths.instant, without.instant);
    }

    #[test]
    fn test_decode_rejects_impossible_dates() {
        for input in [
            "111319080000000+", // month 13
            "110019080000000+", // month 0
            "110230080000000+", // 30 February
            "111032080000000+", // day 32
            "111019250000000+", // hour 25
            "111019086000000+", // minute 60
            "111019080060000+", // second 60
        ] {
            assert!(decode_str(input).unwrap_err().is_malformed(), "{input}");
        }
    }

    #[test]
    fn test_decode_leap_day() {
        let ts = decode_str("120229120000000+").unwrap();
        assert_eq!(ts.instant, Utc.with_ymd_and_hms(2012, 2, 29, 12, 0, 0).unwrap());
        assert!(decode_str("110229120000000+").is_err());
    }

    #[test]
    fn test_decode_offset_limits() {
        let ts = decode_str("111019080000095-").unwrap();
        assert_eq!(ts.offset().unwrap().local_minus_utc(), -(23 * 3600 + 45 * 60));

        let ts = decode_str("111019080000095+").unwrap();
        assert_eq!(ts.instant, Utc.with_ymd_and_hms(2011, 10, 18, 8, 15, 0).unwrap());
    }

    #[test]
    fn test_decode_offsets_of_a_day_or_more() {
        let ts = decode_str("111019080000096+").unwrap();
        assert_eq!(ts.instant, Utc.with_ymd_and_hms(2011, 10, 18, 8, 0, 0).unwrap());
        assert_eq!(ts.offset_seconds(), Some(24 * 3600));
        // beyond what chrono's FixedOffset can hold
        assert_eq!(ts.offset(), None);
        assert_eq!(ts.local_time(), None);

        let ts = decode_str("111019080000099-").unwrap();
        assert_eq!(ts.instant, Utc.with_ymd_and_hms(2011, 10, 20, 8, 45, 0).unwrap());
        assert_eq!(ts.offset_seconds(), Some(-(24 * 3600 + 45 * 60)));
        assert_eq!(ts.duration, TimeDelta::hours(24) + TimeDelta::minutes(45));
    }

    #[test]
    fn test_format_in_own_offset() {
        let cest = offset(120);
        let instant = Utc.with_ymd_and_hms(2011, 10, 19, 7, 30, 0).unwrap();
        assert_eq!(
            format_absolute_instant(&instant.with_timezone(&cest)).unwrap(),
            "111019093000008+"
        );
        assert_eq!(format_absolute_instant_at(instant, cest).unwrap(), "111019093000008+");
    }

    #[test]
    fn test_format_utc_and_negative_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 12, 12, 0, 0).unwrap();
        assert_eq!(format_absolute_instant(&instant).unwrap(), "240712120000000+");
        assert_eq!(
            format_absolute_instant_at(instant, offset(-300)).unwrap(),
            "240712070000020-"
        );
    }

    #[test]
    fn test_format_tenths() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 12, 12, 0, 0).unwrap()
            + TimeDelta::milliseconds(750);
        assert_eq!(format_absolute_instant(&instant).unwrap(), "240712120000700+");
    }

    #[test]
    fn test_format_rejects_odd_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 12, 12, 0, 0).unwrap();
        let odd = FixedOffset::east_opt(5 * 3600 + 20 * 60).unwrap();
        assert_eq!(
            format_absolute_instant_at(instant, odd).unwrap_err(),
            TimeFormatError::UnrepresentableOffset { seconds: 19_200 }
        );
    }

    #[test]
    fn test_format_rejects_year_outside_century() {
        let instant = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            format_absolute_instant(&instant).unwrap_err(),
            TimeFormatError::YearOutOfRange { year: 1999 }
        );
        // midnight in UTC+1 is already 2100 locally
        let instant = Utc.with_ymd_and_hms(2099, 12, 31, 23, 30, 0).unwrap();
        assert!(format_absolute_instant_at(instant, offset(60)).is_err());
    }

    #[test]
    fn test_formatted_instants_decode_back() {
        let instant = Utc.with_ymd_and_hms(2031, 3, 30, 1, 15, 42).unwrap();
        for zone in [offset(0), offset(345), offset(-570), offset(720)] {
            let text = format_absolute_instant_at(instant, zone).unwrap();
            let ts = decode_str(&text).unwrap();
            assert_eq!(ts.instant, instant, "{text}");
            assert_eq!(ts.offset(), Some(zone), "{text}");
        }
    }
}
