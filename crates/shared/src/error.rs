use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body FastAPI attaches to non-2xx responses. Only used for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorDetail {
    pub fn describe(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSource {
    Transport,
    Status(u16),
    Decode,
}

/// The one failure kind the client distinguishes. `kind` and `message`
/// exist for diagnostics; the user only ever sees the apology string.
#[derive(Debug, Clone, Error)]
#[error("recommendation request failed ({kind:?}): {message}")]
pub struct RequestFailed {
    pub kind: FailureSource,
    pub message: String,
}

impl RequestFailed {
    pub fn new(kind: FailureSource, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureSource::Transport, message)
    }

    pub fn status(code: u16, detail: Option<String>) -> Self {
        let message = match detail {
            Some(detail) => format!("HTTP {code}: {detail}"),
            None => format!("HTTP {code}"),
        };
        Self::new(FailureSource::Status(code), message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FailureSource::Decode, message)
    }
}
