// ABOUTME: Delivery receipt timestamps (YYMMDDhhmm, optionally YYMMDDhhmmss) without any UTC offset
// ABOUTME: Interprets the wall-clock fields in a configurable zone, the local system zone by default

use crate::timeformat::absolute::CENTURY;
use crate::timeformat::error::{TimeFormatError, TimeFormatResult};
use crate::timeformat::grammar::DlrFields;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Zone used to interpret delivery receipt timestamps
///
/// Receipt dates carry no offset. SMSCs normally stamp them in their own
/// local time, which in practice matches the receiving host's zone or UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DlrTimeZone {
    /// The host's local zone; ambiguous wall-clock times take the earlier instant
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl DlrTimeZone {
    fn resolve(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            DlrTimeZone::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|t| t.with_timezone(&Utc)),
            DlrTimeZone::Utc => Some(Utc.from_utc_datetime(naive)),
            DlrTimeZone::Fixed(offset) => offset
                .from_local_datetime(naive)
                .single()
                .map(|t| t.with_timezone(&Utc)),
        }
    }
}

pub(crate) fn decode(input: &str, zone: DlrTimeZone) -> TimeFormatResult<DateTime<Utc>> {
    let fields = DlrFields::parse(input)?;

    let naive = NaiveDate::from_ymd_opt(
        CENTURY + i32::from(fields.year),
        fields.month.into(),
        fields.day.into(),
    )
    .and_then(|date| {
        date.and_hms_opt(
            fields.hour.into(),
            fields.minute.into(),
            fields.second.unwrap_or(0).into(),
        )
    })
    .ok_or_else(|| TimeFormatError::malformed(input, "date or time field out of range"))?;

    zone.resolve(&naive)
        .ok_or_else(|| TimeFormatError::malformed(input, "time does not exist in receipt zone"))
}
