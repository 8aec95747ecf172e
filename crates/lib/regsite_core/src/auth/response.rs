//! Provider response envelope.
//!
//! The provider answers every call with `{ data, error }`. [`AuthResponse`]
//! mirrors that wire shape; [`AuthOutcome`] is the exhaustive form consumers
//! branch on.

use serde::{Deserialize, Deserializer, Serialize};

use super::codes::ErrorCode;

/// Error half of a provider response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(
        default,
        rename = "statusText",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_text: Option<String>,
    /// Structured code, when the provider sent one we recognise.
    #[serde(
        default,
        deserialize_with = "lenient_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<ErrorCode>,
}

impl ErrorDetail {
    /// Error carrying only free text.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Error carrying a structured code and its canonical text.
    pub fn coded(code: ErrorCode) -> Self {
        Self {
            message: code.canonical_message().to_string(),
            code: Some(code),
            ..Self::default()
        }
    }

    /// Attach the HTTP status the error arrived with.
    pub fn with_status(mut self, status: u16, status_text: Option<String>) -> Self {
        self.status = Some(status);
        self.status_text = status_text;
        self
    }
}

/// Accept `null` where a string is expected.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Unrecognised or malformed codes become `None` instead of failing the
/// whole response.
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<ErrorCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

/// Wire envelope: `data` on success, `error` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse<T> {
    pub data: Option<T>,
    pub error: Option<ErrorDetail>,
}

impl<T> AuthResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ErrorDetail) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// True iff an error is present.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// True iff data is present and no error is.
    ///
    /// A response with neither is classed as neither success nor failure by
    /// these two predicates; [`AuthResponse::into_outcome`] resolves it.
    pub fn is_success(&self) -> bool {
        self.data.is_some() && self.error.is_none()
    }

    /// Collapse into the exhaustive form.
    ///
    /// An error always wins over data. A response carrying neither becomes a
    /// failure with an empty [`ErrorDetail`].
    pub fn into_outcome(self) -> AuthOutcome<T> {
        match (self.data, self.error) {
            (_, Some(error)) => AuthOutcome::Failure(error),
            (Some(data), None) => AuthOutcome::Success(data),
            (None, None) => AuthOutcome::Failure(ErrorDetail::default()),
        }
    }
}

/// Exactly one of success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome<T> {
    Success(T),
    Failure(ErrorDetail),
}
