//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_sms;

pub use send_sms::{decode_error_message, decode_send_sms_response, encode_send_sms_body};
