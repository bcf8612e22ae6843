//! Marketplace endpoints.

use black_excellence_core::ProductId;
use reqwest::Method;
use tracing::instrument;

use super::ApiClient;
use super::types::{CategoryList, Product, ProductQuery, PurchaseReceipt};
use crate::error::ApiError;

impl ApiClient {
    /// List active products, optionally filtered server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let builder = self
            .request(Method::GET, "/api/marketplace/products")?
            .query(&query.to_pairs());
        self.send(builder).await
    }

    /// Get one product.
    ///
    /// # Errors
    ///
    /// Returns a 404 status error if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get(&format!("/api/marketplace/products/{id}")).await
    }

    /// Distinct categories of active products.
    ///
    /// The envelope is returned as-is; `categories` is `None` when the
    /// backend omitted it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_marketplace_categories(&self) -> Result<CategoryList, ApiError> {
        self.get("/api/marketplace/categories").await
    }

    /// Buy one unit of a product directly, bypassing the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is missing, out of stock, or the
    /// request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn purchase_product(&self, id: ProductId) -> Result<PurchaseReceipt, ApiError> {
        self.send(self.request(Method::POST, &format!("/api/marketplace/products/{id}/purchase"))?)
            .await
    }
}
