//! Error types for the core library.

use reqwest::StatusCode;
use thiserror::Error;

use crate::workflow::Phase;

/// Banner text shown when test creation fails without a server message.
pub const GENERIC_CREATE_FAILURE: &str = "Failed to create test";

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No non-empty recipient was supplied for the probe email.
    #[error("Recipient email is required")]
    MissingRecipient,

    /// The backend refused the connection or could not be reached.
    #[error("Cannot connect to server. Please ensure the backend is running.")]
    Unreachable(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: StatusCode,
        /// Raw response body.
        body: String,
        /// `message` field of a JSON error body, when present.
        message: Option<String>,
    },

    /// The request was sent but no response arrived.
    #[error("No response from server: {0}")]
    NoResponse(#[source] reqwest::Error),

    /// Any other HTTP client failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Workflow action is not allowed in the current phase.
    #[error("Cannot {action} while in the {from} phase")]
    InvalidTransition {
        /// Phase the workflow was in.
        from: Phase,
        /// Attempted action.
        action: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the server-provided `message` of an HTTP error response.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Maps a failed identify/create sequence to the text shown in the creation banner.
#[must_use]
pub fn creation_error_message(error: &Error) -> String {
    error
        .server_message()
        .unwrap_or(GENERIC_CREATE_FAILURE)
        .to_string()
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_used_for_creation_banner() {
        let error = Error::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: r#"{"message":"rate limited"}"#.to_string(),
            message: Some("rate limited".to_string()),
        };
        assert_eq!(creation_error_message(&error), "rate limited");
    }

    #[test]
    fn test_creation_banner_falls_back_to_generic_text() {
        let error = Error::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "oops".to_string(),
            message: None,
        };
        assert_eq!(creation_error_message(&error), GENERIC_CREATE_FAILURE);
        assert_eq!(
            creation_error_message(&Error::MissingRecipient),
            GENERIC_CREATE_FAILURE
        );
    }

    #[test]
    fn test_missing_recipient_message() {
        assert_eq!(
            Error::MissingRecipient.to_string(),
            "Recipient email is required"
        );
    }
}
