//! End-to-end tests for the Black Excellence History client.
//!
//! Each test starts its own `mockito` server standing in for the backend and
//! drives the client library against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p black-excellence-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_lifecycle` - login, logout, bearer header, token persistence
//! - `cart_flow` - reload-after-mutate, quantity checks, checkout handoff
//! - `marketplace_flow` - category fallback, optimistic stock, product pages
//! - `content_and_plans` - AI chat request body, plans, registration checks

#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;

use black_excellence_client::{ApiClient, ClientConfig, Session};
use mockito::{Mock, Server, ServerGuard};
use secrecy::SecretString;
use url::Url;

/// Token the mock backend hands out and expects back.
pub const TOKEN: &str = "test-token";

/// `Authorization` header value for [`TOKEN`].
pub const BEARER: &str = "Bearer test-token";

/// A mock backend plus a client pointed at it.
pub struct TestContext {
    pub server: ServerGuard,
    pub api: ApiClient,
}

impl TestContext {
    /// Anonymous client with an in-memory session.
    pub async fn new() -> Self {
        Self::with_session(Session::in_memory()).await
    }

    /// Client whose session already holds [`TOKEN`].
    pub async fn logged_in() -> Self {
        let session = Session::in_memory();
        session
            .store_token(&SecretString::from(TOKEN))
            .expect("memory storage never fails");
        Self::with_session(session).await
    }

    pub async fn with_session(session: Session) -> Self {
        let server = Server::new_async().await;
        let api = client_for(&server, session);
        Self { server, api }
    }

    /// Mock a JSON response for `method path`, ignoring any query string.
    pub async fn json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_query(mockito::Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

/// Build a client for `server` on top of `session`.
pub fn client_for(server: &ServerGuard, session: Session) -> ApiClient {
    let config = ClientConfig::new(Url::parse(&server.url()).expect("mock server URL"));
    ApiClient::new(&config, session).expect("client builds")
}

/// A fresh token file path unique to this process and `name`.
pub fn scratch_token_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bxh-it-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("session.json")
}

/// A product as the backend serializes it.
pub fn product_json(id: i64, name: &str, category: &str, price: f64, stock: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": format!("{name} from the Black Excellence collection"),
        "price": price,
        "category": category,
        "seller_id": null,
        "image_urls": [format!("https://img.test/{id}.jpg")],
        "tags": [category.to_lowercase()],
        "is_active": true,
        "stock_quantity": stock
    })
}
