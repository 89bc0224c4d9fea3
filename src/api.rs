//! JSON API surface for the planner.

use std::sync::Arc;

use axum::{Router, extract::State, response::Json, routing::post};
use serde::{Deserialize, Serialize};

use crate::models::TripRequest;
use crate::planner::TripPlanner;

/// Incoming plan request body
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub mode: PlanMode,
}

/// Which lookups the caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    Weather,
    Places,
    #[default]
    Both,
}

/// Outgoing plan response body
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub reply: String,
}

impl From<&PlanRequest> for TripRequest {
    fn from(request: &PlanRequest) -> Self {
        TripRequest::new(
            request.place.clone(),
            matches!(request.mode, PlanMode::Weather | PlanMode::Both),
            matches!(request.mode, PlanMode::Places | PlanMode::Both),
        )
    }
}

pub fn router(planner: Arc<TripPlanner>) -> Router {
    Router::new()
        .route("/plan", post(plan))
        .with_state(planner)
}

async fn plan(
    State(planner): State<Arc<TripPlanner>>,
    Json(payload): Json<PlanRequest>,
) -> Json<PlanResponse> {
    let request = TripRequest::from(&payload);
    let reply = planner.plan_trip(&request).await;
    Json(PlanResponse { reply })
}
