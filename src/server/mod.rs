//! HTTP adapter for consumers of the nutrition snapshot.
//!
//! # Endpoints
//!
//! - `GET /health`: health check
//! - `GET /state`: current foods and macro days
//! - `GET|POST /mealplan`: meal plan from the configured planner

mod planner;

pub use planner::MealPlanner;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use ffa_core::{Snapshot, StateReader};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub state: Arc<dyn StateReader>,
    pub planner: Option<Arc<dyn MealPlanner>>,
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

fn error_response(status: StatusCode, error: &'static str, message: String) -> Response {
    (status, Json(ErrorResponse { error, message })).into_response()
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn current_state(State(app): State<AppState>) -> Json<Snapshot> {
    Json(app.state.current_state())
}

async fn meal_plan(State(app): State<AppState>) -> Response {
    let Some(planner) = app.planner else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "planner_unavailable",
            "No meal planner is configured".to_string(),
        );
    };

    tracing::info!("Generating meal plan...");
    match planner.generate_meal_plan().await {
        Ok(plan) => Json(plan).into_response(),
        Err(e) => {
            tracing::error!("{}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "planner_failed",
                e.to_string(),
            )
        }
    }
}

/// Builds the HTTP router. Consumers can only read state; all writes come from
/// the file ingestion pipeline.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/state", get(current_state))
        .route("/mealplan", get(meal_plan).post(meal_plan))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
