//! Value types, re-exported at the crate root.

pub mod email;
pub mod id;
pub mod price;
pub mod quantity;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{CartItemId, EventId, FigureId, OrderId, PlanId, ProductId, SellerId, UserId};
pub use price::Price;
pub use quantity::{Quantity, QuantityError};
pub use status::{OrderStatus, SubscriptionTier};
