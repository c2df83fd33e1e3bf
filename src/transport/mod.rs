//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod envelope;
mod reports;
mod scalar;
mod send;

pub use envelope::{TransportError, decode_status_response};
pub use reports::{
    decode_detailed_report_response, decode_reply_report_response, encode_detailed_report_query,
    encode_reply_report_query,
};
pub use send::{
    encode_context_body, encode_context_schedule_body, encode_schedule_body, encode_send_body,
};
