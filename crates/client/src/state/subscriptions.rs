//! Subscription plan view state.

use black_excellence_core::PlanId;
use tracing::{instrument, warn};

use super::Feedback;
use crate::api::ApiClient;
use crate::api::types::SubscriptionPlan;

const LOAD_FAILED: &str = "Unable to load plans right now.";
const SELECTED: &str = "Plan selected.";
const SELECT_FAILED: &str = "Could not select plan.";

/// The plan list and the outcome of the last selection.
#[derive(Debug, Clone)]
pub struct PlanBoard {
    api: ApiClient,
    plans: Vec<SubscriptionPlan>,
    loading: bool,
    feedback: Feedback,
}

impl PlanBoard {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            plans: Vec::new(),
            loading: false,
            feedback: Feedback {
                error: None,
                message: None,
            },
        }
    }

    #[must_use]
    pub fn plans(&self) -> &[SubscriptionPlan] {
        &self.plans
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        self.loading = true;
        self.feedback.error = None;
        match self.api.get_plans().await {
            Ok(plans) => self.plans = plans,
            Err(err) => {
                warn!(error = %err, "Failed to load plans");
                // Always the generic text, whatever the backend said.
                self.feedback.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    #[instrument(skip(self), fields(plan_id = %id))]
    pub async fn select(&mut self, id: PlanId) {
        self.feedback.clear();
        self.loading = true;
        match self.api.select_plan(id).await {
            Ok(selection) => self.feedback.succeed(selection.message.as_deref(), SELECTED),
            Err(err) => self.feedback.fail(&err, SELECT_FAILED),
        }
        self.loading = false;
    }
}
