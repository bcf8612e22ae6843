//! Wire types for the Black Excellence History API.
//!
//! Field names follow the backend's JSON exactly. Optional and list fields
//! default when absent so that a backend adding or omitting fields does not
//! break decoding.

use black_excellence_core::{
    CartItemId, EventId, FigureId, OrderId, OrderStatus, PlanId, Price, ProductId, SellerId,
    SubscriptionTier, UserId,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =============================================================================
// Account Types
// =============================================================================

/// Response to a successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// The authenticated user, as returned by `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
}

impl UserProfile {
    /// Full name when set, username otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

// =============================================================================
// Content Types
// =============================================================================

/// A historical figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalFigure {
    pub id: FigureId,
    pub name: String,
    pub birth_year: i32,
    #[serde(default)]
    pub death_year: Option<i32>,
    pub profession: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub biography: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
}

impl HistoricalFigure {
    /// Life span for display, e.g. `1818–1895` or `1929–present`.
    #[must_use]
    pub fn lifespan(&self) -> String {
        match self.death_year {
            Some(death) => format!("{}–{death}", self.birth_year),
            None => format!("{}–present", self.birth_year),
        }
    }
}

/// A historical event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub id: EventId,
    pub title: String,
    pub year: i32,
    pub description: String,
    pub significance: String,
    pub location: String,
    #[serde(default)]
    pub key_figures: Vec<String>,
}

/// `{categories: [...]}` envelope used by both category endpoints.
///
/// `categories` is `None` when the backend omits it, which callers treat as
/// "unavailable".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

// =============================================================================
// Product Types
// =============================================================================

const fn default_true() -> bool {
    true
}

/// A marketplace product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub seller_id: Option<SellerId>,
    /// Ordered; the first entry is the primary image.
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub stock_quantity: i64,
}

impl Product {
    /// Primary image URL, if the product has any images.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Whether no units are left.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.stock_quantity <= 0
    }

    /// Case-insensitive substring match against name, description and tags.
    ///
    /// An empty (or all-whitespace) term matches every product.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    }
}

/// Optional server-side filters for the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ProductQuery {
    /// Query string pairs; absent or blank filters are omitted.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        [("category", &self.category), ("search", &self.search)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (key, v))
            })
            .collect()
    }
}

/// Result of a direct (non-cart) purchase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseReceipt {
    #[serde(default)]
    pub message: Option<String>,
    /// Authoritative stock after the purchase, when the backend reports it.
    #[serde(default)]
    pub remaining_stock: Option<i64>,
}

// =============================================================================
// Cart Types
// =============================================================================

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub quantity: i64,
    pub product: Product,
    /// Computed by the backend; never recomputed locally.
    pub subtotal: Price,
}

/// Generic `{message}` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// A checkout session with the external payment provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

// =============================================================================
// Order Types
// =============================================================================

/// A line of a placed order, priced at order time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: i64,
    pub unit_price: Price,
    pub subtotal: Price,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_amount: Price,
    /// Backend timestamps are naive UTC.
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Subscription Types
// =============================================================================

/// A subscription plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub name: String,
    pub price: Price,
    pub interval: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub stripe_price_id: Option<String>,
}

impl SubscriptionPlan {
    /// `Free` for zero-priced plans, `$x.yy` otherwise.
    #[must_use]
    pub fn price_label(&self) -> String {
        if self.price.is_zero() {
            "Free".to_string()
        } else {
            self.price.to_string()
        }
    }
}

/// Result of selecting a plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanSelection {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub plan: Option<SubscriptionPlan>,
}
