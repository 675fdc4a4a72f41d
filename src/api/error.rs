//! API Error Types
//!
//! One taxonomy for every service call, whichever HTTP stack made it.
//! Screens never show these structurally: each error collapses to one
//! human-readable line, chosen per screen.

use thiserror::Error;

/// Errors from a call to the auth, stats or board service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401: stored credentials have been cleared
    #[error("Unauthorized: please log in again")]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx status
    #[error("Request failed with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// 2xx with `success: false`
    #[error("{}", .message.as_deref().unwrap_or("The request was not successful"))]
    Unsuccessful { message: Option<String> },

    /// 2xx envelope without `data`
    #[error("Response did not include any data")]
    MissingData,

    /// Connection, DNS, timeout or request construction failure
    #[error("Network error: {0}")]
    Network(String),

    /// Body did not parse as the expected JSON
    #[error("Parse error: {0}")]
    Decode(String),
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build the error for a non-2xx status and its (optional) body message
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Rejected { status, message }
        }
    }

    /// HTTP status, when the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the service, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Rejected { message, .. }
            | ApiError::Unsuccessful { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Line shown on the login form
    pub fn login_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self.status() {
            Some(401) => "Invalid username or password.".to_string(),
            _ => "Login failed. Please try again.".to_string(),
        }
    }

    /// Line shown on the signup form
    pub fn signup_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self.status() {
            Some(400) => "Please check your input.".to_string(),
            _ => "Signup failed. Please try again.".to_string(),
        }
    }

    /// Line shown under the match-history search box
    pub fn lookup_message(&self) -> String {
        match self {
            ApiError::Rejected { .. } | ApiError::Unsuccessful { .. } | ApiError::MissingData => {
                "Player not found.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Line shown on the match detail page
    pub fn match_detail_message(&self) -> String {
        match self {
            ApiError::Rejected { .. } | ApiError::Unsuccessful { .. } | ApiError::MissingData => {
                "Could not load this match.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_timeout() {
            ApiError::Network("request timed out".to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16(), None)
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(ApiError::from_status(401, None).is_unauthorized());
        assert_eq!(
            ApiError::from_status(404, None),
            ApiError::Rejected {
                status: 404,
                message: None
            }
        );
    }

    #[test]
    fn test_server_message_wins() {
        let err = ApiError::Rejected {
            status: 409,
            message: Some("Username already exists".to_string()),
        };
        assert_eq!(err.signup_message(), "Username already exists");
        assert_eq!(err.login_message(), "Username already exists");
    }

    #[test]
    fn test_status_fallback_messages() {
        let bad_request = ApiError::Rejected {
            status: 400,
            message: None,
        };
        assert_eq!(bad_request.signup_message(), "Please check your input.");
        assert_eq!(bad_request.login_message(), "Login failed. Please try again.");

        let unauthorized = ApiError::Unauthorized { message: None };
        assert_eq!(unauthorized.login_message(), "Invalid username or password.");
        assert_eq!(unauthorized.signup_message(), "Signup failed. Please try again.");

        let blank = ApiError::Rejected {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.signup_message(), "Signup failed. Please try again.");
    }

    #[test]
    fn test_lookup_messages() {
        let not_found = ApiError::Rejected {
            status: 404,
            message: None,
        };
        assert_eq!(not_found.lookup_message(), "Player not found.");
        assert_eq!(not_found.match_detail_message(), "Could not load this match.");

        let offline = ApiError::Network("connection refused".to_string());
        assert_eq!(offline.lookup_message(), "Network error: connection refused");
    }

    #[test]
    fn test_unsuccessful_display() {
        let err = ApiError::Unsuccessful { message: None };
        assert_eq!(err.to_string(), "The request was not successful");

        let err = ApiError::Unsuccessful {
            message: Some("Duplicate".to_string()),
        };
        assert_eq!(err.to_string(), "Duplicate");
    }
}
