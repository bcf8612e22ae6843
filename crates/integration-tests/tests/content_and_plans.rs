//! Integration tests for content browsing, the AI historian, registration
//! and subscription plans.

use black_excellence_client::state::PlanBoard;
use black_excellence_client::{
    ApiError, ChatOptions, Registration, RegistrationForm, ValidationError,
};
use black_excellence_core::{FigureId, PlanId, SubscriptionTier};
use black_excellence_integration_tests::{BEARER, TestContext};
use mockito::Matcher;
use serde_json::json;

// =============================================================================
// Registration
// =============================================================================

fn form(password: &str, confirm: &str) -> RegistrationForm {
    RegistrationForm {
        full_name: "Ida B. Wells".to_string(),
        email: "ida@example.org".to_string(),
        username: "ida".to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
    }
}

#[tokio::test]
async fn test_password_mismatch_sends_nothing() {
    let mut ctx = TestContext::new().await;
    let register = ctx
        .server
        .mock("POST", "/api/auth/register")
        .expect(0)
        .create_async()
        .await;

    let err = Registration::from_form(form("hunter22", "hunter23")).expect_err("mismatch");
    assert!(matches!(err, ValidationError::PasswordMismatch));
    assert_eq!(err.to_string(), "Passwords do not match.");

    register.assert_async().await;
    assert!(!ctx.api.is_authenticated());
}

#[tokio::test]
async fn test_register_sends_four_fields_and_stores_token() {
    let mut ctx = TestContext::new().await;
    let register = ctx
        .server
        .mock("POST", "/api/auth/register")
        .match_body(Matcher::Json(json!({
            "full_name": "Ida B. Wells",
            "email": "ida@example.org",
            "username": "ida",
            "password": "hunter22"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "test-token", "token_type": "bearer"}"#)
        .expect(1)
        .create_async()
        .await;

    let registration = Registration::from_form(form("hunter22", "hunter22")).expect("valid form");
    ctx.api.register(&registration).await.expect("registered");

    register.assert_async().await;
    assert!(ctx.api.is_authenticated());
}

#[tokio::test]
async fn test_register_conflict_surfaces_detail() {
    let mut ctx = TestContext::new().await;
    let _register = ctx
        .json(
            "POST",
            "/api/auth/register",
            400,
            r#"{"detail": "Username already taken"}"#,
        )
        .await;

    let registration = Registration::from_form(form("hunter22", "hunter22")).expect("valid form");
    let err = ctx
        .api
        .register(&registration)
        .await
        .expect_err("conflict");

    assert_eq!(err.user_message("Registration failed."), "Username already taken");
    assert!(!ctx.api.is_authenticated());
}

// =============================================================================
// Content
// =============================================================================

#[tokio::test]
async fn test_figure_detail_and_missing_figure() {
    let mut ctx = TestContext::new().await;
    let _figure = ctx
        .json(
            "GET",
            "/api/figures/1",
            200,
            &json!({
                "id": 1,
                "name": "Mary McLeod Bethune",
                "birth_year": 1875,
                "death_year": 1955,
                "profession": "Educator",
                "achievements": ["Founded Bethune-Cookman College"],
                "biography": "Educator and civil rights leader.",
                "image_url": null,
                "category": "Education"
            })
            .to_string(),
        )
        .await;
    let _missing = ctx
        .json("GET", "/api/figures/99", 404, r#"{"detail": "Figure not found"}"#)
        .await;

    let figure = ctx.api.get_figure(FigureId::new(1)).await.expect("figure");
    assert_eq!(figure.lifespan(), "1875–1955");

    let err = ctx
        .api
        .get_figure(FigureId::new(99))
        .await
        .expect_err("missing figure");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_content_categories() {
    let mut ctx = TestContext::new().await;
    let _categories = ctx
        .json(
            "GET",
            "/api/categories",
            200,
            r#"{"categories": ["Civil Rights", "Science", "Arts"]}"#,
        )
        .await;

    let categories = ctx.api.get_categories().await.expect("categories");
    assert_eq!(categories, vec!["Civil Rights", "Science", "Arts"]);
}

// =============================================================================
// AI Historian
// =============================================================================

#[tokio::test]
async fn test_ai_chat_sends_default_options() {
    let mut ctx = TestContext::new().await;
    let chat = ctx
        .server
        .mock("POST", "/api/ai/chat")
        .match_body(Matcher::Json(json!({
            "message": "Who was Bessie Coleman?",
            "temperature": 0.2,
            "top_p": 0.7,
            "max_tokens": 512,
            "thinking": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response": "The first African American woman to hold a pilot license."}"#)
        .expect(1)
        .create_async()
        .await;

    let answer = ctx
        .api
        .ask_ai("  Who was Bessie Coleman?  ", ChatOptions::default())
        .await
        .expect("answer");

    chat.assert_async().await;
    assert!(answer.contains("pilot license"));
}

#[tokio::test]
async fn test_ai_chat_overrides_and_blank_question() {
    let mut ctx = TestContext::new().await;
    let chat = ctx
        .server
        .mock("POST", "/api/ai/chat")
        .match_body(Matcher::PartialJson(json!({
            "max_tokens": 64,
            "thinking": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response": "Short answer."}"#)
        .expect(1)
        .create_async()
        .await;

    let err = ctx
        .api
        .ask_ai("   ", ChatOptions::default())
        .await
        .expect_err("blank question");
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::EmptyQuestion)
    ));

    let options = ChatOptions {
        max_tokens: Some(64),
        thinking: Some(false),
        ..ChatOptions::default()
    };
    ctx.api
        .ask_ai("Summarize the Montgomery bus boycott", options)
        .await
        .expect("answer");

    chat.assert_async().await;
}

// =============================================================================
// Subscription Plans
// =============================================================================

#[tokio::test]
async fn test_plans_list_and_select() {
    let mut ctx = TestContext::logged_in().await;
    let plans = json!([
        {"id": 1, "name": "Free", "price": 0.0, "interval": "month",
         "description": "Explore curated figures and events.", "features": ["Browse figures"],
         "stripe_price_id": null},
        {"id": 2, "name": "Basic", "price": 9.99, "interval": "month",
         "description": "More AI questions.", "features": ["AI historian"],
         "stripe_price_id": null}
    ]);
    let _plans = ctx
        .json("GET", "/api/subscriptions/plans", 200, &plans.to_string())
        .await;
    let select = ctx
        .server
        .mock("POST", "/api/subscriptions/select")
        .match_header("authorization", BEARER)
        .match_query(Matcher::UrlEncoded("plan_id".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "Plan selected", "plan": plans[1]}).to_string())
        .expect(1)
        .create_async()
        .await;
    let _me = ctx
        .json(
            "GET",
            "/api/auth/me",
            200,
            r#"{"id": 1, "email": "ida@example.org", "username": "ida", "full_name": null, "subscription_tier": "basic"}"#,
        )
        .await;

    let mut board = PlanBoard::new(ctx.api.clone());
    board.load().await;
    let labels: Vec<String> = board.plans().iter().map(|p| p.price_label()).collect();
    assert_eq!(labels, vec!["Free", "$9.99"]);

    board.select(PlanId::new(2)).await;
    select.assert_async().await;
    assert_eq!(board.feedback().message.as_deref(), Some("Plan selected"));

    let user = ctx.api.current_user().await.expect("profile");
    assert_eq!(user.subscription_tier, SubscriptionTier::Basic);
}

#[tokio::test]
async fn test_select_unknown_plan_reports_detail() {
    let mut ctx = TestContext::logged_in().await;
    let _select = ctx
        .json(
            "POST",
            "/api/subscriptions/select",
            404,
            r#"{"detail": "Plan not found"}"#,
        )
        .await;

    let mut board = PlanBoard::new(ctx.api.clone());
    board.select(PlanId::new(42)).await;

    assert_eq!(board.feedback().error.as_deref(), Some("Plan not found"));
}
