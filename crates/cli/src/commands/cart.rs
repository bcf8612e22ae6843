//! Cart, checkout and order commands.
//!
//! # Usage
//!
//! ```bash
//! bxh cart add 3 --quantity 2
//! bxh cart update 11 4
//! bxh cart remove 11
//! bxh cart show
//! bxh cart checkout
//! bxh orders create
//! bxh orders list
//! ```

use black_excellence_client::ApiClient;
use black_excellence_client::state::{CartManager, CartState, CheckoutOutcome};
use black_excellence_core::{CartItemId, ProductId};

use super::{CliError, report};

#[allow(clippy::print_stdout)]
fn print_cart(state: &CartState) {
    if state.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for item in &state.items {
        println!(
            "{:>4}  {:<40} {:>3} x {:>9} = {:>9}",
            item.id,
            item.product.name,
            item.quantity,
            item.product.price.to_string(),
            item.subtotal.to_string()
        );
    }
    println!("Total: {}", state.total());
}

pub async fn show(api: &ApiClient) -> Result<(), CliError> {
    let cart = CartManager::new(api.clone());
    cart.load().await;
    let state = cart.state();
    report(&state.feedback)?;
    print_cart(&state);
    Ok(())
}

pub async fn add(api: &ApiClient, product_id: ProductId, quantity: i64) -> Result<(), CliError> {
    let cart = CartManager::new(api.clone());
    cart.add(product_id, quantity).await;
    let state = cart.state();
    report(&state.feedback)?;
    print_cart(&state);
    Ok(())
}

pub async fn update(api: &ApiClient, item_id: CartItemId, quantity: i64) -> Result<(), CliError> {
    let cart = CartManager::new(api.clone());
    cart.update_quantity(item_id, quantity).await;
    let state = cart.state();
    report(&state.feedback)?;
    print_cart(&state);
    Ok(())
}

pub async fn remove(api: &ApiClient, item_id: CartItemId) -> Result<(), CliError> {
    let cart = CartManager::new(api.clone());
    cart.remove(item_id).await;
    let state = cart.state();
    report(&state.feedback)?;
    print_cart(&state);
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn checkout(api: &ApiClient) -> Result<(), CliError> {
    let cart = CartManager::new(api.clone());
    match cart.checkout().await {
        CheckoutOutcome::Redirect(url) => {
            println!("Continue to payment: {url}");
            Ok(())
        }
        CheckoutOutcome::Pending | CheckoutOutcome::Failed => report(&cart.feedback()),
    }
}

#[allow(clippy::print_stdout)]
pub async fn orders(api: &ApiClient) -> Result<(), CliError> {
    let orders = api.get_orders().await?;
    if orders.is_empty() {
        println!("No orders yet.");
    }
    for order in orders {
        println!(
            "#{}  {}  {:<9}  {}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.status,
            order.total_amount
        );
        for item in &order.items {
            println!(
                "       {} x {} @ {}",
                item.quantity, item.product.name, item.unit_price
            );
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn create_order(api: &ApiClient) -> Result<(), CliError> {
    let order = api
        .create_order()
        .await
        .map_err(|e| CliError::inline(&e, "Unable to place order."))?;
    println!("Order #{} created ({}), total {}", order.id, order.status, order.total_amount);
    Ok(())
}
