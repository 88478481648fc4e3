pub mod json_api;

pub use json_api::{analyze_snapshot_json, encode_response, handle_message, handle_message_json};
