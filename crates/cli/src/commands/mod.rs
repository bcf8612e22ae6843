//! `bxh` subcommands.
//!
//! Commands print results to stdout. Failures come back as [`CliError`] and
//! are printed as a single line on stderr by `main`.

pub mod auth;
pub mod cart;
pub mod content;
pub mod plans;
pub mod shop;

use black_excellence_client::state::Feedback;
use black_excellence_client::{ApiError, ConfigError, StorageError, ValidationError};
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", .0.user_message(&.0.to_string()))]
    Api(#[from] ApiError),

    /// An operation reported an inline error.
    #[error("{0}")]
    Failed(String),

    #[error("Failed to read input: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl CliError {
    /// Turn an API error into the inline message a view would show.
    pub fn inline(err: &ApiError, fallback: &str) -> Self {
        Self::Failed(err.user_message(fallback))
    }
}

/// Print the success message, or return the error message as a failure.
#[allow(clippy::print_stdout)]
fn report(feedback: &Feedback) -> Result<(), CliError> {
    if let Some(error) = &feedback.error {
        return Err(CliError::Failed(error.clone()));
    }
    if let Some(message) = &feedback.message {
        println!("{message}");
    }
    Ok(())
}
