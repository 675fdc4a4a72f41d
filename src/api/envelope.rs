//! Response Envelope
//!
//! The auth and stats services wrap every body as
//! `{ "success": bool, "message"?: string, "data"?: T }`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};

/// Standard service response wrapper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// The payload of a successful response
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::Unsuccessful {
                message: self.message,
            });
        }
        self.data.ok_or(ApiError::MissingData)
    }

    /// Success check for calls whose payload is irrelevant (logout)
    pub fn into_unit(self) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Unsuccessful {
                message: self.message,
            })
        }
    }
}

/// Body that may or may not be enveloped
///
/// The board service predates the envelope and answers with bare JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Enveloped(ApiResponse<T>),
    Bare(T),
}

impl<T> Payload<T> {
    pub fn into_data(self) -> ApiResult<T> {
        match self {
            Payload::Enveloped(envelope) => envelope.into_data(),
            Payload::Bare(data) => Ok(data),
        }
    }
}

/// Parse a successful body as an envelope and unwrap its data
pub fn parse_data<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str::<ApiResponse<T>>(body)?.into_data()
}

/// Pull a human-readable message out of an error body
///
/// Looks for `message`, then `error` (string or `{ message }`); plain-text
/// bodies are not shown.
pub fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    let candidate = value
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| value.get("error").and_then(|e| e.as_str()))
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
        })?;

    let trimmed = candidate.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
