//! Cart view state.
//!
//! The cart shown to the user is only ever a backend snapshot: every
//! mutation is followed by a full reload, never a local patch. Mutations and
//! their reloads are serialised per manager, so a slow response to an
//! earlier edit can never overwrite the reload of a later one.

use std::sync::{Arc, Mutex, PoisonError};

use black_excellence_core::{CartItemId, Price, ProductId};
use tracing::{info, instrument, warn};
use url::Url;

use super::Feedback;
use crate::api::ApiClient;
use crate::api::types::CartItem;
use crate::error::ApiError;

const LOAD_FAILED: &str = "Unable to load cart. Please try again.";
const ADDED: &str = "Added to cart.";
const ADD_FAILED: &str = "Could not add to cart.";
const UPDATE_FAILED: &str = "Unable to update item.";
const REMOVED: &str = "Item removed.";
const REMOVE_FAILED: &str = "Unable to remove item.";
const CHECKOUT_FAILED: &str = "Unable to start checkout.";
const CHECKOUT_PENDING: &str = "Checkout session created, but no redirect URL provided.";

/// What the cart currently displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub loading: bool,
    pub feedback: Feedback,
}

impl CartState {
    /// Sum of the backend-computed line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.subtotal).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of [`CartManager::checkout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Hand off to the payment provider. There is no way back into the cart
    /// from here; the provider redirects to the frontend when done.
    Redirect(Url),
    /// A session was created but no redirect URL came back.
    Pending,
    /// Checkout did not start; the reason is in the cart feedback.
    Failed,
}

/// Holds and reconciles the displayed cart for one session.
///
/// Cheap to clone; clones share state and the mutation lock.
#[derive(Debug, Clone)]
pub struct CartManager {
    api: ApiClient,
    state: Arc<Mutex<CartState>>,
    cycle: Arc<tokio::sync::Mutex<()>>,
}

impl CartManager {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(CartState::default())),
            cycle: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// A copy of what the cart currently displays.
    #[must_use]
    pub fn state(&self) -> CartState {
        self.lock().clone()
    }

    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().items.clone()
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.lock().feedback.clone()
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.lock().total()
    }

    /// Replace the displayed items with a fresh snapshot.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        let _cycle = self.cycle.lock().await;
        self.reload().await;
    }

    /// Add `quantity` units of a product, then reload.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&self, product_id: ProductId, quantity: i64) {
        let _cycle = self.cycle.lock().await;
        match self.api.add_to_cart(product_id, quantity).await {
            Ok(_) => {
                self.lock().feedback.succeed(None, ADDED);
                self.reload().await;
            }
            Err(err) => self.record_failure(&err, ADD_FAILED),
        }
    }

    /// Set a line's quantity, then reload.
    ///
    /// A quantity of zero removes the line; a negative quantity is rejected
    /// without a request.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_quantity(&self, item_id: CartItemId, quantity: i64) {
        if quantity == 0 {
            self.remove(item_id).await;
            return;
        }

        let _cycle = self.cycle.lock().await;
        match self.api.update_cart_item(item_id, quantity).await {
            Ok(_) => {
                self.lock().feedback.message = None;
                self.reload().await;
            }
            Err(err) => self.record_failure(&err, UPDATE_FAILED),
        }
    }

    /// Delete a line, then reload.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove(&self, item_id: CartItemId) {
        let _cycle = self.cycle.lock().await;
        match self.api.remove_cart_item(item_id).await {
            Ok(response) => {
                self.lock()
                    .feedback
                    .succeed(response.message.as_deref(), REMOVED);
                self.reload().await;
            }
            Err(err) => self.record_failure(&err, REMOVE_FAILED),
        }
    }

    /// Start a payment checkout for the whole cart.
    ///
    /// Failure leaves the items untouched and reports inline.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> CheckoutOutcome {
        let _cycle = self.cycle.lock().await;
        self.lock().feedback.clear();

        let session = match self.api.create_checkout_session().await {
            Ok(session) => session,
            Err(err) => {
                self.record_failure(&err, CHECKOUT_FAILED);
                return CheckoutOutcome::Failed;
            }
        };

        let Some(raw) = session.checkout_url.filter(|u| !u.trim().is_empty()) else {
            self.lock().feedback.succeed(None, CHECKOUT_PENDING);
            return CheckoutOutcome::Pending;
        };

        match Url::parse(&raw) {
            Ok(url) => {
                info!(session_id = ?session.session_id, "Handing off to checkout");
                CheckoutOutcome::Redirect(url)
            }
            Err(err) => {
                warn!(error = %err, url = %raw, "Checkout URL is not a valid URL");
                self.record_failure(&ApiError::Url(err), CHECKOUT_FAILED);
                CheckoutOutcome::Failed
            }
        }
    }

    /// Fetch the cart and replace the displayed items. Callers hold `cycle`.
    async fn reload(&self) {
        {
            let mut state = self.lock();
            state.loading = true;
            state.feedback.error = None;
        }

        let result = self.api.get_cart().await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(items) => state.items = items,
            Err(err) => state.feedback.fail(&err, LOAD_FAILED),
        }
    }

    fn record_failure(&self, err: &ApiError, fallback: &str) {
        warn!(error = %err, "Cart operation failed");
        self.lock().feedback.fail(err, fallback);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
