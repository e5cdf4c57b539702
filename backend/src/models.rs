use serde::{Deserialize, Serialize};
use tripgen_shared::{ItineraryDay, TripForm, TripRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanApiRequest {
    #[serde(flatten)]
    pub form: TripForm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub request: TripRequest,
    pub days: Vec<ItineraryDay>,
    pub markup: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResponse {
    pub system: String,
    pub user: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
