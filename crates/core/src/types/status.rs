//! Status enums for orders and accounts.
//!
//! The backend sends these as lowercase strings. Values this client does not
//! know about deserialize to an `Other` variant instead of failing the whole
//! response.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order payment status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, waiting for the payment provider to confirm.
    #[default]
    Pending,
    /// Payment confirmed.
    Completed,
    /// Any status this client does not model.
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Completed => f.write_str("completed"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Subscription tier attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Basic,
    Premium,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("free"),
            Self::Basic => f.write_str("basic"),
            Self::Premium => f.write_str("premium"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_order_status() {
        let status: OrderStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, OrderStatus::Completed);
    }

    #[test]
    fn test_unknown_order_status_is_kept() {
        let status: OrderStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(status, OrderStatus::Other("refunded".to_string()));
        assert_eq!(status.to_string(), "refunded");
    }

    #[test]
    fn test_subscription_tier_roundtrip() {
        let tier: SubscriptionTier = serde_json::from_str("\"premium\"").unwrap();
        assert_eq!(tier, SubscriptionTier::Premium);
        assert_eq!(serde_json::to_string(&tier).unwrap(), "\"premium\"");
    }
}
