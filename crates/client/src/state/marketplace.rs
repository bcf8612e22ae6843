//! Marketplace view state.
//!
//! Unlike the cart, the catalog is not reloaded after a direct purchase: the
//! purchased product's stock is adjusted locally and the next full load
//! corrects any drift.

use black_excellence_core::{ProductId, Quantity};
use tracing::{instrument, warn};

use super::Feedback;
use crate::api::ApiClient;
use crate::api::types::{Product, ProductQuery};

/// Category entry that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

const LOAD_FAILED: &str = "Could not load products. Please try again.";
const PURCHASED: &str = "Order created.";
const PURCHASE_FAILED: &str = "Purchase failed.";
const ADDED: &str = "Added to cart.";
const ADD_FAILED: &str = "Could not add to cart.";
const PRODUCT_NOT_FOUND: &str = "Product not found.";
const DETAIL_ADD_FAILED: &str = "Add to cart failed.";

/// The loaded catalog with its category list.
#[derive(Debug, Clone)]
pub struct Marketplace {
    api: ApiClient,
    products: Vec<Product>,
    categories: Vec<String>,
    loading: bool,
    feedback: Feedback,
}

impl Marketplace {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            products: Vec::new(),
            categories: vec![ALL_CATEGORIES.to_string()],
            loading: false,
            feedback: Feedback::default(),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Category choices, always starting with [`ALL_CATEGORIES`].
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Fetch products, then categories.
    ///
    /// When the category list is unavailable, the categories of the loaded
    /// products are used instead. A product failure leaves the previous
    /// catalog in place.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        self.loading = true;
        self.feedback.error = None;

        let products = match self.api.get_products(&ProductQuery::default()).await {
            Ok(products) => products,
            Err(err) => {
                warn!(error = %err, "Failed to load products");
                // Generic text even when the backend sent a detail
                self.feedback.error = Some(LOAD_FAILED.to_string());
                self.loading = false;
                return;
            }
        };

        let listed = match self.api.get_marketplace_categories().await {
            Ok(list) => list.categories,
            Err(err) => {
                warn!(error = %err, "Category list unavailable, deriving from products");
                None
            }
        };
        let listed = listed.unwrap_or_else(|| derive_categories(&products));

        self.categories = std::iter::once(ALL_CATEGORIES.to_string())
            .chain(listed)
            .collect();
        self.products = products;
        self.loading = false;
    }

    /// Buy one unit directly and adjust that product's stock locally.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn purchase(&mut self, id: ProductId) {
        self.feedback.clear();
        match self.api.purchase_product(id).await {
            Ok(receipt) => {
                self.feedback.succeed(receipt.message.as_deref(), PURCHASED);
                if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
                    let current = product.stock_quantity;
                    product.stock_quantity = receipt
                        .remaining_stock
                        .unwrap_or_else(|| current.saturating_sub(1))
                        .max(0);
                }
            }
            Err(err) => {
                warn!(error = %err, "Purchase failed");
                self.feedback.fail(&err, PURCHASE_FAILED);
            }
        }
    }

    /// Put one unit of a product in the cart.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_to_cart(&mut self, id: ProductId) {
        self.feedback.clear();
        match self.api.add_to_cart(id, Quantity::ONE.get()).await {
            Ok(_) => self.feedback.succeed(None, ADDED),
            Err(err) => self.feedback.fail(&err, ADD_FAILED),
        }
    }

    /// Products matching the selected category and search term.
    pub fn visible_products<'a>(
        &'a self,
        category: &'a str,
        term: &'a str,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |product| {
            (category == ALL_CATEGORIES || product.category == category)
                && product.matches_search(term)
        })
    }
}

/// Distinct, non-empty product categories in first-seen order.
fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !product.category.is_empty() && !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

/// A single product with its own feedback.
#[derive(Debug, Clone)]
pub struct ProductPage {
    api: ApiClient,
    product: Option<Product>,
    loading: bool,
    feedback: Feedback,
}

impl ProductPage {
    /// Where the page's "back" action leads.
    pub const BACK_LINK: &'static str = "/marketplace";

    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            product: None,
            loading: false,
            feedback: Feedback::default(),
        }
    }

    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn load(&mut self, id: ProductId) {
        self.loading = true;
        self.feedback.error = None;
        match self.api.get_product(id).await {
            Ok(product) => self.product = Some(product),
            Err(err) => {
                self.product = None;
                if err.is_not_found() {
                    self.feedback.error = Some(PRODUCT_NOT_FOUND.to_string());
                } else {
                    self.feedback.fail(&err, PRODUCT_NOT_FOUND);
                }
            }
        }
        self.loading = false;
    }

    /// Put one unit of the loaded product in the cart.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&mut self) {
        let Some(id) = self.product.as_ref().map(|p| p.id) else {
            return;
        };
        self.feedback.clear();
        match self.api.add_to_cart(id, Quantity::ONE.get()).await {
            Ok(_) => self.feedback.succeed(None, ADDED),
            Err(err) => self.feedback.fail(&err, DETAIL_ADD_FAILED),
        }
    }
}
