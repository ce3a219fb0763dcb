use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub mod contact;
pub mod lead;

#[derive(Serialize)]
pub struct ApiError<D> {
    pub error: D,
}

#[derive(Serialize)]
pub struct ApiMessage {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ApiSuccess {
    pub success: bool,
}

/// Parses a json request body, which must be a json object. Every field of the
/// request models is an optional string, so anything else in a known field is
/// rejected as well.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    let value = serde_json::from_slice::<Value>(body)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("request body is not a json object"));
    }
    serde_json::from_value(value)
}
