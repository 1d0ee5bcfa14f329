// SMPP v3.4 time field codec - reads and writes schedule_delivery_time and
// validity_period as they appear inside a PDU body.
//
// Both fields are C-Octet Strings: either a single NULL octet (immediate /
// SMSC default) or 16 characters followed by NULL. The value itself is
// validated by the time format grammar.

use crate::datatypes::SmppDateTime;
use crate::timeformat::TimeFormatError;
use bytes::{Buf, BufMut, BytesMut};
use std::io::Cursor;
use thiserror::Error;
use tracing::trace;

/// Maximum encoded size of a time field, NULL terminator included
pub const TIME_FIELD_MAX_LEN: usize = 17;

/// Codec errors with detailed context for debugging
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Incomplete field: need more data")]
    Incomplete,

    #[error("Field '{field}' validation failed: {reason}")]
    FieldValidation { field: &'static str, reason: String },

    #[error("UTF-8 decoding error in field '{field}': {source}")]
    Utf8Error {
        field: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Invalid timestamp in field '{field}': {source}")]
    InvalidTimestamp {
        field: &'static str,
        #[source]
        source: TimeFormatError,
    },
}

/// Decode a NULL terminated C-Octet String of at most `max_len` octets
///
/// `max_len` counts the terminator. The cursor is left after the NULL.
pub fn decode_cstring(
    buf: &mut Cursor<&[u8]>,
    max_len: usize,
    field_name: &'static str,
) -> Result<String, CodecError> {
    let available = buf.chunk();
    let window = &available[..available.len().min(max_len)];

    let Some(end) = window.iter().position(|&b| b == 0) else {
        if available.len() < max_len {
            return Err(CodecError::Incomplete);
        }
        return Err(CodecError::FieldValidation {
            field: field_name,
            reason: format!("no NULL terminator within {max_len} octets"),
        });
    };

    let value = buf.copy_to_bytes(end);
    buf.advance(1); // NULL

    String::from_utf8(value.to_vec()).map_err(|e| CodecError::Utf8Error {
        field: field_name,
        source: e,
    })
}

/// Encode a C-Octet String: the value followed by a single NULL
pub fn encode_cstring(buf: &mut BytesMut, value: &str) {
    buf.put_slice(value.as_bytes());
    buf.put_u8(0);
}

/// Decode a schedule_delivery_time or validity_period field
pub fn decode_time_field(
    buf: &mut Cursor<&[u8]>,
    field_name: &'static str,
) -> Result<SmppDateTime, CodecError> {
    let raw = decode_cstring(buf, TIME_FIELD_MAX_LEN, field_name)?;
    trace!(field = field_name, value = %raw, "decoded time field");

    SmppDateTime::new(&raw).map_err(|source| CodecError::InvalidTimestamp {
        field: field_name,
        source,
    })
}

/// Encode a schedule_delivery_time or validity_period field
pub fn encode_time_field(buf: &mut BytesMut, value: &SmppDateTime) {
    encode_cstring(buf, value.as_str());
}
