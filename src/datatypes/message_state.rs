// ABOUTME: Defines SMPP v3.4 message_state values (Section 5.2.28) and their delivery receipt spellings
// ABOUTME: Maps between the numeric TLV/query_sm value and the 7 character "stat:" text

use num_enum::TryFromPrimitive;
use std::fmt;
use std::str::FromStr;

/// SMPP v3.4 Message State (Section 5.2.28)
///
/// Reported numerically by `query_sm_resp` and the `message_state` TLV, and
/// textually in the `stat:` field of a delivery receipt (Appendix B).
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageState {
    /// The message is in enroute state
    Enroute = 1,
    /// Message is delivered to destination
    Delivered = 2,
    /// Message validity period has expired
    Expired = 3,
    /// Message has been deleted
    Deleted = 4,
    /// Message is undeliverable
    Undeliverable = 5,
    /// Message is in accepted state (read manually on behalf of the subscriber)
    Accepted = 6,
    /// Message is in invalid state
    Unknown = 7,
    /// Message is in a rejected state
    Rejected = 8,
}

impl MessageState {
    /// Receipt text spelling, e.g. `DELIVRD`
    pub fn as_str(self) -> &'static str {
        match self {
            MessageState::Enroute => "ENROUTE",
            MessageState::Delivered => "DELIVRD",
            MessageState::Expired => "EXPIRED",
            MessageState::Deleted => "DELETED",
            MessageState::Undeliverable => "UNDELIV",
            MessageState::Accepted => "ACCEPTD",
            MessageState::Unknown => "UNKNOWN",
            MessageState::Rejected => "REJECTD",
        }
    }

    /// True once the SMSC will report no further changes
    pub fn is_final(self) -> bool {
        !matches!(self, MessageState::Enroute | MessageState::Accepted)
    }
}

impl fmt::Display for MessageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised `stat:` text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessageState(pub String);

impl fmt::Display for UnknownMessageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown message state '{}'", self.0)
    }
}

impl std::error::Error for UnknownMessageState {}

impl FromStr for MessageState {
    type Err = UnknownMessageState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ENROUTE" => Ok(MessageState::Enroute),
            "DELIVRD" => Ok(MessageState::Delivered),
            "EXPIRED" => Ok(MessageState::Expired),
            "DELETED" => Ok(MessageState::Deleted),
            "UNDELIV" => Ok(MessageState::Undeliverable),
            "ACCEPTD" => Ok(MessageState::Accepted),
            "UNKNOWN" => Ok(MessageState::Unknown),
            "REJECTD" => Ok(MessageState::Rejected),
            _ => Err(UnknownMessageState(s.to_string())),
        }
    }
}
