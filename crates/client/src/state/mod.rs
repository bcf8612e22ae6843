//! View state held on the client.
//!
//! The managers here own what a page displays and nothing else: the backend
//! stays authoritative. Every operation reports its outcome through
//! [`Feedback`] instead of returning an error, mirroring an inline message
//! under the control that triggered it.

pub mod cart;
pub mod marketplace;
pub mod subscriptions;

pub use cart::{CartManager, CartState, CheckoutOutcome};
pub use marketplace::{ALL_CATEGORIES, Marketplace, ProductPage};
pub use subscriptions::PlanBoard;

use tracing::debug;

use crate::error::ApiError;

/// Inline error and success messages for one view.
///
/// At most one of the two is meaningful at a time; recording one clears the
/// other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl Feedback {
    pub fn clear(&mut self) {
        self.error = None;
        self.message = None;
    }

    /// Record a failure, preferring the backend detail over `fallback`.
    pub fn fail(&mut self, err: &ApiError, fallback: &str) {
        debug!(error = %err, "Recording inline error");
        self.message = None;
        self.error = Some(err.user_message(fallback));
    }

    /// Record a success message, preferring the backend's own message.
    pub fn succeed(&mut self, message: Option<&str>, fallback: &str) {
        self.error = None;
        self.message = Some(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback)
                .to_string(),
        );
    }
}
