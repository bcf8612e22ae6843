//! Integration tests for the login/logout lifecycle and bearer injection.

use black_excellence_client::{ApiError, Credentials, Session};
use black_excellence_integration_tests::{BEARER, TestContext, client_for, scratch_token_file};
use mockito::Matcher;
use secrecy::ExposeSecret;
use serde_json::json;

// =============================================================================
// Login / Logout
// =============================================================================

#[tokio::test]
async fn test_login_stores_token_and_authorizes_requests() {
    let mut ctx = TestContext::new().await;

    let login = ctx
        .server
        .mock("POST", "/api/auth/login")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({"username": "ida", "password": "hunter22"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "test-token", "token_type": "bearer"}"#)
        .expect(1)
        .create_async()
        .await;
    let me = ctx
        .server
        .mock("GET", "/api/auth/me")
        .match_header("authorization", BEARER)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": 1, "email": "ida@example.org", "username": "ida",
                "full_name": "Ida B. Wells", "subscription_tier": "free"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    assert!(!ctx.api.is_authenticated());
    let token = ctx
        .api
        .login(&Credentials::new("ida", "hunter22"))
        .await
        .expect("login succeeds");
    assert_eq!(token.expose_secret(), "test-token");
    assert!(ctx.api.is_authenticated());

    let user = ctx.api.current_user().await.expect("profile loads");
    assert_eq!(user.display_name(), "Ida B. Wells");

    login.assert_async().await;
    me.assert_async().await;
}

#[tokio::test]
async fn test_logout_drops_authorization_header() {
    let mut ctx = TestContext::logged_in().await;

    let with_token = ctx
        .server
        .mock("GET", "/api/cart")
        .match_header("authorization", BEARER)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    ctx.api.get_cart().await.expect("cart loads");
    with_token.assert_async().await;
    with_token.remove_async().await;

    ctx.api.logout();
    assert!(!ctx.api.is_authenticated());

    let without_token = ctx
        .server
        .mock("GET", "/api/cart")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Could not validate credentials"}"#)
        .expect(1)
        .create_async()
        .await;

    let err = ctx.api.get_cart().await.expect_err("anonymous cart is rejected");
    assert!(err.is_unauthorized());
    without_token.assert_async().await;
}

#[tokio::test]
async fn test_failed_login_keeps_session_empty() {
    let mut ctx = TestContext::new().await;
    let _login = ctx
        .json(
            "POST",
            "/api/auth/login",
            401,
            r#"{"detail": "Incorrect username or password"}"#,
        )
        .await;

    let err = ctx
        .api
        .login(&Credentials::new("ida", "wrong"))
        .await
        .expect_err("login fails");

    assert_eq!(err.user_message("Login failed."), "Incorrect username or password");
    assert!(!ctx.api.is_authenticated());
}

#[tokio::test]
async fn test_login_without_token_is_an_error() {
    let mut ctx = TestContext::new().await;
    let _login = ctx
        .json("POST", "/api/auth/login", 200, r#"{"token_type": "bearer"}"#)
        .await;

    let err = ctx
        .api
        .login(&Credentials::new("ida", "hunter22"))
        .await
        .expect_err("no token in response");

    assert!(matches!(err, ApiError::MissingToken));
    assert!(!ctx.api.is_authenticated());
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_file_session_survives_restart() {
    let path = scratch_token_file("restart");
    let mut ctx = TestContext::with_session(Session::file(&path).expect("open token file")).await;
    let _login = ctx
        .json(
            "POST",
            "/api/auth/login",
            200,
            r#"{"access_token": "test-token", "token_type": "bearer"}"#,
        )
        .await;

    ctx.api
        .login(&Credentials::new("ida", "hunter22"))
        .await
        .expect("login succeeds");

    // A new process opens the same file
    let reopened = Session::file(&path).expect("reopen token file");
    assert!(reopened.is_authenticated());

    let cart = ctx
        .server
        .mock("GET", "/api/cart")
        .match_header("authorization", BEARER)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let api = client_for(&ctx.server, reopened.clone());
    api.get_cart().await.expect("cart loads with persisted token");
    cart.assert_async().await;

    api.logout();
    assert!(!Session::file(&path).expect("reopen again").is_authenticated());
}

#[tokio::test]
async fn test_login_that_cannot_be_saved_stays_logged_out() {
    let path = scratch_token_file("unwritable");
    let mut ctx = TestContext::with_session(Session::file(&path).expect("open token file")).await;
    let dir = path.parent().expect("token file has a directory");
    // A plain file where the session directory should be created
    std::fs::write(dir, "").expect("create blocking file");

    let _login = ctx
        .json(
            "POST",
            "/api/auth/login",
            200,
            r#"{"access_token": "test-token", "token_type": "bearer"}"#,
        )
        .await;
    let anonymous = ctx
        .server
        .mock("GET", "/api/cart")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Not authenticated"}"#)
        .expect(1)
        .create_async()
        .await;

    let err = ctx
        .api
        .login(&Credentials::new("ida", "hunter22"))
        .await
        .expect_err("token could not be persisted");
    assert!(matches!(err, ApiError::Storage(_)));
    assert!(!ctx.api.is_authenticated());

    ctx.api.get_cart().await.expect_err("no bearer after failed save");
    anonymous.assert_async().await;

    let _ = std::fs::remove_file(dir);
}
