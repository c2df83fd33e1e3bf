use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::domain::OperationResult;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct EnvelopeJson {
    #[serde(rename = "Success")]
    success: bool,
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Object", default)]
    object: Option<Box<RawValue>>,
}

/// Decode the `{Success, Message, Object}` wrapper shared by every endpoint.
///
/// `Object` is only decoded (as `W`) for successful responses; failed responses
/// never carry a payload.
pub fn decode_envelope<W, T>(
    json: &str,
    map: impl FnOnce(W) -> T,
) -> Result<OperationResult<T>, TransportError>
where
    W: DeserializeOwned,
{
    let parsed: EnvelopeJson = serde_json::from_str(json)?;
    let message = parsed.message.unwrap_or_default();

    if !parsed.success {
        return Ok(OperationResult::failed(message));
    }

    let object = match parsed.object {
        Some(raw) => serde_json::from_str::<W>(raw.get())?,
        None => serde_json::from_str::<W>("null")?,
    };
    Ok(OperationResult::succeeded(message, Some(map(object))))
}

/// Decode a response whose payload is irrelevant (send/schedule endpoints).
pub fn decode_status_response(json: &str) -> Result<OperationResult<()>, TransportError> {
    let result = decode_envelope::<serde::de::IgnoredAny, ()>(json, |_| ())?;
    Ok(OperationResult {
        payload: None,
        ..result
    })
}
