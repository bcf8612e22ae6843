//! Black Excellence History client library.
//!
//! Talks to the Black Excellence History backend over its REST contract and
//! holds the small amount of client-side state the application needs.
//!
//! # Architecture
//!
//! - [`session`] - process-wide token storage (login/logout lifecycle)
//! - [`api`] - the authenticated HTTP client and one method per endpoint
//! - [`state`] - view state for the cart and marketplace, with inline
//!   user-facing feedback
//!
//! The backend is the source of truth for carts, stock and prices. The cart
//! is always reloaded after a mutation; the marketplace applies a single
//! optimistic stock decrement after a direct purchase.
//!
//! # Example
//!
//! ```rust,ignore
//! use black_excellence_client::{ApiClient, ClientConfig, Credentials, Session};
//! use black_excellence_client::state::CartManager;
//!
//! let config = ClientConfig::from_env()?;
//! let session = Session::file(&config.token_file)?;
//! let api = ApiClient::new(&config, session)?;
//!
//! api.login(&Credentials::new("ida", "secret")).await?;
//!
//! let cart = CartManager::new(api.clone());
//! cart.add(ProductId::new(1), 2).await;
//! println!("total: {}", cart.total());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod state;

pub use api::ApiClient;
pub use api::auth::{Credentials, Registration, RegistrationForm};
pub use api::content::ChatOptions;
pub use api::types::*;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, StorageError, ValidationError};
pub use session::{FileStorage, MemoryStorage, Session, TokenStorage};
