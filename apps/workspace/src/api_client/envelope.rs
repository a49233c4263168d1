use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::errors::TransportError;

/// `{ success, message?, data? }` wrapper every endpoint answers with.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Discriminated result of a call that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    /// `success: false`, carrying the backend message verbatim.
    Rejected(String),
}

impl<T> ApiOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            ApiOutcome::Success(data) => ApiOutcome::Success(f(data)),
            ApiOutcome::Rejected(message) => ApiOutcome::Rejected(message),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiOutcome::Success(data) => Ok(data),
            ApiOutcome::Rejected(message) => Err(message),
        }
    }
}

pub type ApiResult<T> = Result<ApiOutcome<T>, TransportError>;

/// Decodes a response body. The HTTP status only matters for diagnostics:
/// a 404 with a JSON envelope is a rejection, a 200 with HTML is a transport fault.
pub(crate) fn read_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> ApiResult<T> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|source| TransportError::MalformedBody { status, source })?;

    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Ok(ApiOutcome::Rejected(message));
    }

    let data = envelope.data.unwrap_or(Value::Null);
    serde_json::from_value(data)
        .map(ApiOutcome::Success)
        .map_err(|source| TransportError::MalformedBody { status, source })
}
