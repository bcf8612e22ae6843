//! Integration tests for the marketplace: catalog load, optimistic stock and
//! product pages.

use black_excellence_client::ProductQuery;
use black_excellence_client::state::{Marketplace, ProductPage};
use black_excellence_core::ProductId;
use black_excellence_integration_tests::{BEARER, TestContext, product_json};
use mockito::Matcher;
use serde_json::json;

fn catalog() -> String {
    json!([
        product_json(1, "Kindred", "Books", 12.5, 3),
        product_json(2, "Freedom Rider Tee", "Apparel", 28.0, 1),
        product_json(3, "March: Book One", "Books", 14.99, 0),
        product_json(4, "Harlem Skyline Print", "Art", 40.0, 6)
    ])
    .to_string()
}

async fn loaded_marketplace(ctx: &mut TestContext, categories: (usize, &str)) -> Marketplace {
    let _products = ctx
        .json("GET", "/api/marketplace/products", 200, &catalog())
        .await;
    let _categories = ctx
        .json("GET", "/api/marketplace/categories", categories.0, categories.1)
        .await;

    let mut market = Marketplace::new(ctx.api.clone());
    market.load().await;
    market
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_categories_come_from_backend() {
    let mut ctx = TestContext::new().await;
    let market = loaded_marketplace(&mut ctx, (200, r#"{"categories": ["Art", "Apparel", "Books"]}"#)).await;

    assert_eq!(market.categories(), ["All", "Art", "Apparel", "Books"]);
}

#[tokio::test]
async fn test_categories_fall_back_when_request_fails() {
    let mut ctx = TestContext::new().await;
    let market = loaded_marketplace(&mut ctx, (500, r#"{"detail": "boom"}"#)).await;

    assert_eq!(market.categories(), ["All", "Books", "Apparel", "Art"]);
    assert_eq!(market.feedback().error, None);
    assert_eq!(market.products().len(), 4);
}

#[tokio::test]
async fn test_categories_fall_back_when_field_absent() {
    let mut ctx = TestContext::new().await;
    let market = loaded_marketplace(&mut ctx, (200, r#"{"items": []}"#)).await;

    assert_eq!(market.categories(), ["All", "Books", "Apparel", "Art"]);
}

// =============================================================================
// Filtering
// =============================================================================

#[tokio::test]
async fn test_server_side_filters_are_sent_only_when_set() {
    let mut ctx = TestContext::new().await;
    let filtered = ctx
        .server
        .mock("GET", "/api/marketplace/products")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("category".into(), "Books".into()),
            Matcher::Regex("^category=Books$".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let query = ProductQuery {
        category: Some("Books".to_string()),
        search: None,
    };
    ctx.api.get_products(&query).await.expect("products load");

    filtered.assert_async().await;
}

#[tokio::test]
async fn test_visible_products_combines_category_and_search() {
    let mut ctx = TestContext::new().await;
    let market = loaded_marketplace(&mut ctx, (200, r#"{"categories": ["Books", "Apparel", "Art"]}"#)).await;

    let ids = |category: &str, term: &str| -> Vec<i64> {
        market
            .visible_products(category, term)
            .map(|p| p.id.as_i64())
            .collect()
    };

    assert_eq!(ids("All", ""), vec![1, 2, 3, 4]);
    assert_eq!(ids("Books", ""), vec![1, 3]);
    assert_eq!(ids("All", "HARLEM"), vec![4]);
    assert_eq!(ids("All", "apparel"), vec![2]);
    assert!(ids("Art", "kindred").is_empty());
}

// =============================================================================
// Direct Purchase
// =============================================================================

#[tokio::test]
async fn test_purchase_uses_remaining_stock_for_target_only() {
    let mut ctx = TestContext::logged_in().await;
    let mut market = loaded_marketplace(&mut ctx, (200, r#"{"categories": []}"#)).await;

    let purchase = ctx
        .server
        .mock("POST", "/api/marketplace/products/4/purchase")
        .match_header("authorization", BEARER)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Order created", "remaining_stock": 5}"#)
        .expect(1)
        .create_async()
        .await;
    // No catalog refetch after the purchase
    let refetch = ctx
        .server
        .mock("GET", "/api/marketplace/products")
        .expect(0)
        .create_async()
        .await;

    let before: Vec<i64> = market.products().iter().map(|p| p.stock_quantity).collect();
    market.purchase(ProductId::new(4)).await;
    let after: Vec<i64> = market.products().iter().map(|p| p.stock_quantity).collect();

    purchase.assert_async().await;
    refetch.assert_async().await;
    assert_eq!(before, vec![3, 1, 0, 6]);
    assert_eq!(after, vec![3, 1, 0, 5]);
    assert_eq!(market.feedback().message.as_deref(), Some("Order created"));
}

#[tokio::test]
async fn test_purchase_sold_out_reports_detail_and_keeps_stock() {
    let mut ctx = TestContext::logged_in().await;
    let mut market = loaded_marketplace(&mut ctx, (200, r#"{"categories": []}"#)).await;
    let _purchase = ctx
        .json(
            "POST",
            "/api/marketplace/products/3/purchase",
            400,
            r#"{"detail": "Out of stock"}"#,
        )
        .await;

    market.purchase(ProductId::new(3)).await;

    assert_eq!(market.feedback().error.as_deref(), Some("Out of stock"));
    let sold_out = market
        .products()
        .iter()
        .find(|p| p.id == ProductId::new(3))
        .expect("product 3 loaded");
    assert!(sold_out.is_sold_out());
    assert_eq!(sold_out.stock_quantity, 0);
}

#[tokio::test]
async fn test_add_to_cart_from_marketplace_sends_one_unit() {
    let mut ctx = TestContext::logged_in().await;
    let mut market = Marketplace::new(ctx.api.clone());
    let add = ctx
        .server
        .mock("POST", "/api/cart")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("product_id".into(), "2".into()),
            Matcher::UrlEncoded("quantity".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 5,
                "quantity": 1,
                "product": product_json(2, "Freedom Rider Tee", "Apparel", 28.0, 1),
                "subtotal": 28.0
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    market.add_to_cart(ProductId::new(2)).await;

    add.assert_async().await;
    assert_eq!(market.feedback().message.as_deref(), Some("Added to cart."));
}

// =============================================================================
// Product Page
// =============================================================================

#[tokio::test]
async fn test_missing_product_shows_not_found() {
    let mut ctx = TestContext::new().await;
    let _product = ctx
        .json(
            "GET",
            "/api/marketplace/products/404",
            404,
            r#"{"detail": "Product not found"}"#,
        )
        .await;

    let mut page = ProductPage::new(ctx.api.clone());
    page.load(ProductId::new(404)).await;

    assert!(page.product().is_none());
    assert_eq!(page.feedback().error.as_deref(), Some("Product not found."));
    assert!(!page.is_loading());
}

#[tokio::test]
async fn test_product_page_add_failure_uses_backend_detail() {
    let mut ctx = TestContext::new().await;
    let _product = ctx
        .json(
            "GET",
            "/api/marketplace/products/1",
            200,
            &product_json(1, "Kindred", "Books", 12.5, 3).to_string(),
        )
        .await;
    let _add = ctx
        .json(
            "POST",
            "/api/cart",
            401,
            r#"{"detail": "Not authenticated"}"#,
        )
        .await;

    let mut page = ProductPage::new(ctx.api.clone());
    page.load(ProductId::new(1)).await;
    assert_eq!(page.product().map(|p| p.name.as_str()), Some("Kindred"));

    page.add_to_cart().await;
    assert_eq!(page.feedback().error.as_deref(), Some("Not authenticated"));
}
