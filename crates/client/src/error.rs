//! Client error taxonomy.
//!
//! Every failure falls into one of three buckets:
//! - the request never got a response ([`ApiError::Transport`])
//! - the backend answered with an error status, usually carrying a
//!   structured `detail` ([`ApiError::Status`])
//! - the input was rejected before any request was built
//!   ([`ApiError::Validation`])
//!
//! Views turn any of them into an inline message with
//! [`ApiError::user_message`].

use black_excellence_core::{EmailError, QuantityError};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`crate::ApiClient`] operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("(no detail)"))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    /// Input rejected on the client; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Login or registration succeeded without returning a token.
    #[error("Authentication response did not include an access token")]
    MissingToken,

    /// The session token could not be persisted.
    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Message to show the user in place of the failed operation.
    ///
    /// Prefers the backend's `detail`, then the validation message, and
    /// falls back to the per-operation `fallback` text.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            Self::Validation(err) => err.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status, if the backend responded.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Whether the backend reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the backend rejected the credentials or token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

/// Input problems caught before a request is issued.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Please enter a question.")]
    EmptyQuestion,

    #[error("{0} is required.")]
    Required(&'static str),

    #[error("{0}")]
    Quantity(#[from] QuantityError),

    #[error("{0}")]
    Email(#[from] EmailError),
}

/// Errors raised by persistent token storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session file: {0}")]
    Corrupt(#[from] serde_json::Error),
}
