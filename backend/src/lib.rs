pub mod config;
pub mod error;
pub mod models;
pub mod transport;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use rand::{SeedableRng, rngs::StdRng};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tripgen_shared::{
    TripForm, build_prompt_template, build_system_prompt, combine_prompt, generate_plan,
    render_plan,
};

use crate::error::TripError;
use crate::models::{ApiError, PlanApiRequest, PlanResponse, PromptResponse};

#[derive(Clone, Default)]
pub struct AppState {
    /// Fallback seed used when a request does not carry one.
    pub seed: Option<u64>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/plan", post(plan_handler))
        .route("/api/prompt", post(prompt_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Seeded when a seed is known, otherwise drawn from OS entropy.
pub fn plan_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

async fn plan_handler(
    State(state): State<AppState>,
    Json(req): Json<PlanApiRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, Json<ApiError>)> {
    let request = req
        .form
        .validate()
        .map_err(|err| api_error(err.into()))?;
    let mut rng = plan_rng(req.seed.or(state.seed));
    let days = generate_plan(&request, &mut rng);
    let markup = render_plan(&days, &request);
    tracing::info!(city = %request.city, days = days.len(), "plan served");

    Ok(Json(PlanResponse {
        request,
        days,
        markup,
    }))
}

async fn prompt_handler(Json(form): Json<TripForm>) -> Json<PromptResponse> {
    let system = build_system_prompt().to_string();
    let user = build_prompt_template(&form);
    let prompt = combine_prompt(&system, &user);
    Json(PromptResponse {
        system,
        user,
        prompt,
    })
}

fn api_error(err: TripError) -> (StatusCode, Json<ApiError>) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!("request failed: {err}");
    }
    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
