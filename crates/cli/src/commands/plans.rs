//! Subscription plan commands.

use black_excellence_client::ApiClient;
use black_excellence_client::state::PlanBoard;
use black_excellence_core::PlanId;

use super::{CliError, report};

#[allow(clippy::print_stdout)]
pub async fn list(api: &ApiClient) -> Result<(), CliError> {
    let mut board = PlanBoard::new(api.clone());
    board.load().await;
    report(board.feedback())?;

    for plan in board.plans() {
        println!("{:>2}  {:<8} {}/{}", plan.id, plan.name, plan.price_label(), plan.interval);
        println!("    {}", plan.description);
        for feature in &plan.features {
            println!("    - {feature}");
        }
    }
    Ok(())
}

pub async fn select(api: &ApiClient, plan_id: PlanId) -> Result<(), CliError> {
    let mut board = PlanBoard::new(api.clone());
    board.select(plan_id).await;
    report(board.feedback())
}
