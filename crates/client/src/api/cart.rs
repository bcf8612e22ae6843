//! Cart, order and checkout endpoints.
//!
//! Quantities are checked locally before any request is built, so a
//! non-positive quantity never reaches the backend.

use black_excellence_core::{CartItemId, ProductId, Quantity};
use reqwest::Method;
use tracing::instrument;

use super::ApiClient;
use super::types::{CartItem, CheckoutSession, MessageResponse, Order};
use crate::error::{ApiError, ValidationError};

impl ApiClient {
    // =========================================================================
    // Cart
    // =========================================================================

    /// Current user's cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (401 when not logged in).
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.get("/api/cart").await
    }

    /// Add `quantity` units of a product to the cart and return the
    /// resulting line.
    ///
    /// The backend merges with an existing line for the same product.
    ///
    /// # Errors
    ///
    /// Returns a validation error without sending anything when `quantity`
    /// is not positive, otherwise an error if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartItem, ApiError> {
        let quantity = Quantity::new(quantity).map_err(ValidationError::from)?;
        let builder = self
            .request(Method::POST, "/api/cart")?
            .query(&[("product_id", product_id.as_i64()), ("quantity", quantity.get())]);
        self.send(builder).await
    }

    /// Set the quantity of an existing cart line.
    ///
    /// # Errors
    ///
    /// Returns a validation error without sending anything when `quantity`
    /// is not positive, otherwise an error if the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_cart_item(
        &self,
        item_id: CartItemId,
        quantity: i64,
    ) -> Result<CartItem, ApiError> {
        let quantity = Quantity::new(quantity).map_err(ValidationError::from)?;
        let builder = self
            .request(Method::PUT, &format!("/api/cart/{item_id}"))?
            .query(&[("quantity", quantity.get())]);
        self.send(builder).await
    }

    /// Delete a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not exist or the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_cart_item(&self, item_id: CartItemId) -> Result<MessageResponse, ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/cart/{item_id}"))?)
            .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Turn the cart into a pending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty or the request fails.
    #[instrument(skip(self))]
    pub async fn create_order(&self) -> Result<Order, ApiError> {
        self.send(self.request(Method::POST, "/api/orders")?).await
    }

    /// The current user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/api/orders").await
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Ask the backend for a payment checkout session for the whole cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty, the payment provider is not
    /// configured, or the request fails.
    #[instrument(skip(self))]
    pub async fn create_checkout_session(&self) -> Result<CheckoutSession, ApiError> {
        self.send(self.request(Method::POST, "/api/checkout/session")?)
            .await
    }
}
