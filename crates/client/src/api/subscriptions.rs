//! Subscription plan endpoints.

use black_excellence_core::PlanId;
use reqwest::Method;
use tracing::{info, instrument};

use super::ApiClient;
use super::types::{PlanSelection, SubscriptionPlan};
use crate::error::ApiError;

impl ApiClient {
    /// Available subscription plans.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_plans(&self) -> Result<Vec<SubscriptionPlan>, ApiError> {
        self.get("/api/subscriptions/plans").await
    }

    /// Select a plan for the current user.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan does not exist, the user is not logged
    /// in, or the request fails.
    #[instrument(skip(self), fields(plan_id = %plan_id))]
    pub async fn select_plan(&self, plan_id: PlanId) -> Result<PlanSelection, ApiError> {
        let builder = self
            .request(Method::POST, "/api/subscriptions/select")?
            .query(&[("plan_id", plan_id.as_i64())]);
        let selection: PlanSelection = self.send(builder).await?;
        info!("Plan selected");
        Ok(selection)
    }
}
