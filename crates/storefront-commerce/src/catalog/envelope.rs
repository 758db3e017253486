//! Response envelope handling.

use serde::de::DeserializeOwned;

use crate::error::CommerceError;

/// Unwrap a single-key response envelope such as `{"data": [...]}`.
///
/// The API wraps every payload in an object whose key varies by endpoint;
/// the payload is always its first value.
pub fn unwrap_envelope<T: DeserializeOwned>(response: serde_json::Value) -> Result<T, CommerceError> {
    let serde_json::Value::Object(map) = response else {
        return Err(CommerceError::UnexpectedResponse(
            "expected an object envelope".to_string(),
        ));
    };

    let payload = map
        .into_iter()
        .next()
        .map(|(_, value)| value)
        .ok_or_else(|| CommerceError::UnexpectedResponse("empty envelope".to_string()))?;

    Ok(serde_json::from_value(payload)?)
}
