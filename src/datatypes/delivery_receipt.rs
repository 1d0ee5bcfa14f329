// ABOUTME: Parser for the SMPP v3.4 Appendix B delivery receipt text carried in deliver_sm short_message
// ABOUTME: Decodes "submit date" and "done date" through the time codec's delivery receipt timestamp decoder

use crate::codec::CodecError;
use crate::datatypes::MessageState;
use crate::timeformat::{Clock, TimeFormat};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use tracing::{debug, trace};

/// A delivery receipt as reported by the SMSC
///
/// The text format is not normative but nearly every SMSC follows the
/// example in SMPP v3.4 Appendix B:
///
/// ```text
/// id:IIIIIIIIII sub:SSS dlvrd:DDD submit date:YYMMDDhhmm done date:YYMMDDhhmm stat:DDDDDDD err:E text:...
/// ```
///
/// `id`, `submit date`, `done date` and `stat` are required; the rest are
/// optional. Keys are matched case-insensitively and unknown keys are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Message ID allocated by the SMSC when the message was submitted
    pub id: String,
    /// Number of short messages originally submitted
    pub submitted: Option<u32>,
    /// Number of short messages delivered
    pub delivered: Option<u32>,
    pub submit_date: DateTime<Utc>,
    pub done_date: DateTime<Utc>,
    pub state: MessageState,
    /// Network specific error code
    pub error: Option<String>,
    /// Leading characters of the original message
    pub text: String,
}

impl DeliveryReceipt {
    /// Parses receipt text, decoding dates with `codec`'s receipt time zone
    pub fn parse<C: Clock>(receipt: &str, codec: &TimeFormat<C>) -> Result<Self, CodecError> {
        let (head, text) = split_text(receipt);

        let mut id = None;
        let mut submitted = None;
        let mut delivered = None;
        let mut submit_date = None;
        let mut done_date = None;
        let mut state = None;
        let mut error = None;

        let mut tokens = head.split_whitespace();
        while let Some(token) = tokens.next() {
            // "submit date:" and "done date:" contain a space
            let joined;
            let token = if token.eq_ignore_ascii_case("submit") || token.eq_ignore_ascii_case("done")
            {
                match tokens.next() {
                    Some(rest) => {
                        joined = format!("{token} {rest}");
                        joined.as_str()
                    }
                    None => token,
                }
            } else {
                token
            };

            let Some((key, value)) = token.split_once(':') else {
                trace!(token, "skipping receipt token without key");
                continue;
            };

            match key.to_ascii_lowercase().as_str() {
                "id" => id = Some(value.to_string()),
                "sub" => submitted = Some(parse_count("sub", value)?),
                "dlvrd" => delivered = Some(parse_count("dlvrd", value)?),
                "submit date" => submit_date = Some(parse_date("submit date", value, codec)?),
                "done date" => done_date = Some(parse_date("done date", value, codec)?),
                "stat" => {
                    state = Some(MessageState::from_str(value).map_err(|e| {
                        CodecError::FieldValidation {
                            field: "stat",
                            reason: e.to_string(),
                        }
                    })?)
                }
                "err" => error = Some(value.to_string()),
                other => trace!(key = other, "skipping unknown receipt key"),
            }
        }

        let receipt = DeliveryReceipt {
            id: required("id", id)?,
            submitted,
            delivered,
            submit_date: required("submit date", submit_date)?,
            done_date: required("done date", done_date)?,
            state: required("stat", state)?,
            error,
            text: text.to_string(),
        };

        debug!(id = %receipt.id, state = %receipt.state, "parsed delivery receipt");
        Ok(receipt)
    }

    /// Time between submission and the final state, as stamped by the SMSC
    pub fn turnaround(&self) -> chrono::TimeDelta {
        self.done_date - self.submit_date
    }
}

impl FromStr for DeliveryReceipt {
    type Err = CodecError;

    /// Parses with the system clock and the local receipt time zone
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &TimeFormat::new())
    }
}

/// Splits off the free-form `text:` tail, which may itself contain spaces
///
/// The key only counts at the start of the receipt or after whitespace, so a
/// value such as `id:context:1` is left intact.
fn split_text(receipt: &str) -> (&str, &str) {
    let lower = receipt.to_ascii_lowercase();
    let key = lower
        .match_indices("text:")
        .map(|(pos, _)| pos)
        .find(|&pos| pos == 0 || receipt.as_bytes()[pos - 1].is_ascii_whitespace());

    match key {
        Some(pos) => (&receipt[..pos], &receipt[pos + "text:".len()..]),
        None => (receipt, ""),
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, CodecError> {
    value.parse().map_err(|_| CodecError::FieldValidation {
        field,
        reason: format!("'{value}' is not a message count"),
    })
}

fn parse_date<C: Clock>(
    field: &'static str,
    value: &str,
    codec: &TimeFormat<C>,
) -> Result<DateTime<Utc>, CodecError> {
    codec
        .parse_dlr_timestamp(value)
        .map_err(|source| CodecError::InvalidTimestamp { field, source })
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, CodecError> {
    value.ok_or(CodecError::FieldValidation {
        field,
        reason: "missing from delivery receipt".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeformat::DlrTimeZone;
    use chrono::{TimeDelta, TimeZone};

    const RECEIPT: &str = "id:0123456789 sub:001 dlvrd:001 submit date:1402031337 \
                           done date:1402031342 stat:DELIVRD err:000 text:Hello SMPP world";

    fn codec() -> TimeFormat {
        TimeFormat::new().with_dlr_time_zone(DlrTimeZone::Utc)
    }

    #[test]
    fn test_parse_standard_receipt() {
        let receipt = DeliveryReceipt::parse(RECEIPT, &codec()).unwrap();
        assert_eq!(receipt.id, "0123456789");
        assert_eq!(receipt.submitted, Some(1));
        assert_eq!(receipt.delivered, Some(1));
        assert_eq!(
            receipt.submit_date,
            Utc.with_ymd_and_hms(2014, 2, 3, 13, 37, 0).unwrap()
        );
        assert_eq!(
            receipt.done_date,
            Utc.with_ymd_and_hms(2014, 2, 3, 13, 42, 0).unwrap()
        );
        assert_eq!(receipt.state, MessageState::Delivered);
        assert_eq!(receipt.error.as_deref(), Some("000"));
        assert_eq!(receipt.text, "Hello SMPP world");
        assert_eq!(receipt.turnaround(), TimeDelta::minutes(5));
    }

    #[test]
    fn test_parse_mixed_case_keys_and_seconds() {
        let text = "id:abc Submit Date:140203133700 Done Date:140203133759 Stat:undeliv Text:x";
        let receipt = DeliveryReceipt::parse(text, &codec()).unwrap();
        assert_eq!(receipt.state, MessageState::Undeliverable);
        assert_eq!(receipt.turnaround(), TimeDelta::seconds(59));
        assert_eq!(receipt.submitted, None);
        assert_eq!(receipt.error, None);
        assert_eq!(receipt.text, "x");
    }

    #[test]
    fn test_parse_skips_unknown_keys() {
        let text = "id:1 foo:bar submit date:0906051337 done date:0906051337 stat:EXPIRED";
        let receipt = DeliveryReceipt::parse(text, &codec()).unwrap();
        assert_eq!(receipt.state, MessageState::Expired);
        assert_eq!(receipt.text, "");
    }

    #[test]
    fn test_text_key_inside_value_is_not_the_tail() {
        let text = "id:context:1 submit date:1402031337 done date:1402031337 stat:DELIVRD \
                    err:000 text:see context:2";
        let receipt = DeliveryReceipt::parse(text, &codec()).unwrap();
        assert_eq!(receipt.id, "context:1");
        assert_eq!(receipt.state, MessageState::Delivered);
        assert_eq!(receipt.text, "see context:2");
    }

    #[test]
    fn test_text_key_at_start() {
        assert_eq!(split_text("text:hello"), ("", "hello"));
        assert_eq!(split_text("id:nexttext:1"), ("id:nexttext:1", ""));
    }

    #[test]
    fn test_parse_missing_required_key() {
        let text = "id:1 submit date:0906051337 stat:DELIVRD";
        let err = DeliveryReceipt::parse(text, &codec()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::FieldValidation {
                field: "done date",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_bad_date() {
        let text = "id:1 submit date:14020313 done date:1402031337 stat:DELIVRD";
        let err = DeliveryReceipt::parse(text, &codec()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidTimestamp {
                field: "submit date",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_bad_state_and_count() {
        let text = "id:1 submit date:1402031337 done date:1402031337 stat:SENT";
        assert!(matches!(
            DeliveryReceipt::parse(text, &codec()).unwrap_err(),
            CodecError::FieldValidation { field: "stat", .. }
        ));

        let text = "id:1 sub:one submit date:1402031337 done date:1402031337 stat:DELIVRD";
        assert!(matches!(
            DeliveryReceipt::parse(text, &codec()).unwrap_err(),
            CodecError::FieldValidation { field: "sub", .. }
        ));
    }

    #[test]
    fn test_from_str_uses_local_zone() {
        let receipt: DeliveryReceipt = RECEIPT.parse().unwrap();
        let expected = crate::timeformat::parse_dlr_timestamp("1402031337").unwrap();
        assert_eq!(receipt.submit_date, expected);
    }
}
