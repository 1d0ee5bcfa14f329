// ABOUTME: Decoded timestamp representation pairing an absolute instant with a relative duration
// ABOUTME: Records whether the wire value was absolute (with its UTC offset) or relative

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

/// Which form of SMPP timestamp was decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampKind {
    /// `+`/`-` terminated; signed UTC offset carried on the wire, which may
    /// reach 24h45m (`nn` = 99)
    Absolute { offset_seconds: i32 },
    /// `R` terminated
    Relative,
}

/// A decoded SMPP timestamp
///
/// Both views are always populated. For an absolute timestamp the instant is
/// authoritative and `duration` is the distance from the decoding clock's
/// "now" (negative for timestamps in the past). For a relative timestamp the
/// duration is authoritative and `instant` is "now" plus the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SmppTimestamp {
    pub instant: DateTime<Utc>,
    pub duration: TimeDelta,
    pub kind: TimestampKind,
}

impl SmppTimestamp {
    pub fn is_relative(&self) -> bool {
        self.kind == TimestampKind::Relative
    }

    /// Signed UTC offset from the wire in seconds, for absolute timestamps
    pub fn offset_seconds(&self) -> Option<i32> {
        match self.kind {
            TimestampKind::Absolute { offset_seconds } => Some(offset_seconds),
            TimestampKind::Relative => None,
        }
    }

    /// UTC offset from the wire, for absolute timestamps
    ///
    /// `None` also when the wire offset is a day or more, which chrono
    /// cannot express as a [`FixedOffset`].
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset_seconds().and_then(FixedOffset::east_opt)
    }

    /// The instant expressed in the offset it was written in
    pub fn local_time(&self) -> Option<DateTime<FixedOffset>> {
        self.offset()
            .map(|offset| self.instant.with_timezone(&offset))
    }

    pub fn into_pair(self) -> (DateTime<Utc>, TimeDelta) {
        (self.instant, self.duration)
    }
}

impl From<SmppTimestamp> for (DateTime<Utc>, TimeDelta) {
    fn from(timestamp: SmppTimestamp) -> Self {
        timestamp.into_pair()
    }
}
