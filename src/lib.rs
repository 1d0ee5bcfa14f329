pub mod codec;
pub mod datatypes;
pub mod timeformat;


// Re-export codec types for direct access
pub use codec::{CodecError, decode_time_field, encode_time_field};

// Re-export the main time format API for easy access
pub use timeformat::{
    Clock, DlrTimeZone, FixedClock, SmppTimestamp, SystemClock, TimeFormat, TimeFormatBuilder,
    TimeFormatError, TimeFormatResult, TimestampKind, format_absolute_instant,
    format_absolute_instant_at, format_relative_duration, parse_dlr_timestamp,
    parse_smpp_timestamp,
};

/// Error returned by the binaries and examples built on this crate.
///
/// Library functions return the specific [`TimeFormatError`] or
/// [`CodecError`]; this boxed form only exists so callers mixing both can use
/// `?` freely.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A specialized `Result` type for callers mixing time and codec errors.
///
/// # Examples
///
/// ## Reading a validity period
///
/// ```rust
/// use chrono::TimeDelta;
/// use smpp_timeformat::datatypes::ValidityPeriod;
/// use smpp_timeformat::TimeFormat;
///
/// fn main() -> smpp_timeformat::Result<()> {
///     let validity: ValidityPeriod = "000001000000000R".parse()?;
///     let resolved = validity.resolve(&TimeFormat::new())?;
///
///     assert_eq!(resolved.map(|ts| ts.duration), Some(TimeDelta::days(1)));
///     Ok(())
/// }
/// ```
///
/// ## Delivery receipts
///
/// ```rust
/// use smpp_timeformat::datatypes::{DeliveryReceipt, MessageState};
/// use smpp_timeformat::{DlrTimeZone, TimeFormat};
///
/// fn main() -> smpp_timeformat::Result<()> {
///     let codec = TimeFormat::new().with_dlr_time_zone(DlrTimeZone::Utc);
///     let receipt = DeliveryReceipt::parse(
///         "id:42 sub:001 dlvrd:001 submit date:1402031337 done date:1402031338 stat:DELIVRD err:000 text:hi",
///         &codec,
///     )?;
///
///     assert_eq!(receipt.state, MessageState::Delivered);
///     assert_eq!(receipt.turnaround().num_minutes(), 1);
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
