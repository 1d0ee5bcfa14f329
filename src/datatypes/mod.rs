mod datetime;
mod delivery_receipt;
mod message_state;

pub use datetime::{ScheduleDeliveryTime, SmppDateTime, ValidityPeriod};
pub use delivery_receipt::DeliveryReceipt;
pub use message_state::{MessageState, UnknownMessageState};
