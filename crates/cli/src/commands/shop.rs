//! Marketplace commands.
//!
//! # Usage
//!
//! ```bash
//! bxh products --category Books --search butler
//! bxh product 3 --add
//! bxh purchase 3
//! ```

use black_excellence_client::state::{Marketplace, ProductPage};
use black_excellence_client::{ApiClient, Product};
use black_excellence_core::ProductId;

use super::{CliError, report};

fn stock_label(product: &Product) -> String {
    if product.is_sold_out() {
        "sold out".to_string()
    } else {
        format!("{} in stock", product.stock_quantity)
    }
}

#[allow(clippy::print_stdout)]
pub async fn products(api: &ApiClient, category: &str, search: &str) -> Result<(), CliError> {
    let mut market = Marketplace::new(api.clone());
    market.load().await;
    report(market.feedback())?;

    println!("Categories: {}", market.categories().join(" | "));
    println!();
    for product in market.visible_products(category, search) {
        println!(
            "{:>4}  {:<40} {:>9}  {:<12} {}",
            product.id,
            product.name,
            product.price.to_string(),
            product.category,
            stock_label(product)
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn product(api: &ApiClient, id: ProductId, add: bool) -> Result<(), CliError> {
    let mut page = ProductPage::new(api.clone());
    page.load(id).await;

    let Some(product) = page.product() else {
        let error = page.feedback().error.clone().unwrap_or_default();
        return Err(CliError::Failed(format!(
            "{error} (back: {})",
            ProductPage::BACK_LINK
        )));
    };

    println!("{}  {}", product.name, product.price);
    println!("{} · {}", product.category, stock_label(product));
    if let Some(image) = product.primary_image() {
        println!("{image}");
    }
    if !product.tags.is_empty() {
        let tags: Vec<String> = product.tags.iter().map(|t| format!("#{t}")).collect();
        println!("{}", tags.join(" "));
    }
    println!();
    println!("{}", product.description);

    if add {
        page.add_to_cart().await;
        report(page.feedback())?;
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn purchase(api: &ApiClient, id: ProductId) -> Result<(), CliError> {
    let mut market = Marketplace::new(api.clone());
    market.load().await;
    market.purchase(id).await;
    report(market.feedback())?;

    if let Some(product) = market.products().iter().find(|p| p.id == id) {
        println!("{}: {}", product.name, stock_label(product));
    }
    Ok(())
}
