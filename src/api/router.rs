//! HTTP router and handlers

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, warn};

use super::auth::{ServiceAuth, credential_from_headers};
use super::error::ApiError;

/// Shared application state
pub struct AppState {
    /// Resolved authentication state for protected routes
    pub auth: ServiceAuth,
}

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/reports/stock-aging", get(stock_aging_handler))
        .route("/optimize/slotting", post(optimize_slotting_handler))
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Input schema for slotting optimization requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlottingInput {
    /// Warehouse to optimize
    pub warehouse_id: String,
    /// Upper bound on the number of proposed moves
    #[serde(default = "default_max_moves")]
    pub max_moves: i64,
}

const MAX_MOVES_MIN: i64 = 1;
const MAX_MOVES_MAX: i64 = 10_000;

fn default_max_moves() -> i64 {
    100
}

impl SlottingInput {
    /// Check the field constraints the schema itself cannot express
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.warehouse_id.is_empty() {
            return Err(ApiError::Validation {
                field: "warehouse_id",
                reason: "must not be empty".to_string(),
            });
        }
        if !(MAX_MOVES_MIN..=MAX_MOVES_MAX).contains(&self.max_moves) {
            return Err(ApiError::Validation {
                field: "max_moves",
                reason: format!("must be between {MAX_MOVES_MIN} and {MAX_MOVES_MAX}"),
            });
        }
        Ok(())
    }
}

/// Health check handler. Never consults the auth gate.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /reports/stock-aging - fixed read-only report stub
async fn stock_aging_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize_request(&state, &headers)?;
    Ok(Json(json!({ "report": [], "read_only": true })))
}

/// POST /optimize/slotting - validate and acknowledge a slotting request
async fn optimize_slotting_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<SlottingInput>,
) -> Result<Json<Value>, ApiError> {
    // Body constraints are a precondition of the token check
    input.validate()?;
    authorize_request(&state, &headers)?;

    debug!(warehouse_id = %input.warehouse_id, max_moves = input.max_moves, "Accepted slotting request");
    Ok(Json(json!({ "status": "accepted", "input": input })))
}

/// Run the auth gate for one request, identically for every protected route.
fn authorize_request(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    state
        .auth
        .authorize(credential_from_headers(headers))
        .inspect_err(|e| match e {
            ApiError::MisconfiguredService => {
                warn!("Rejecting request: service token unset or placeholder");
            }
            ApiError::Unauthorized => debug!("Rejecting request: invalid service token"),
            ApiError::Validation { .. } => {}
        })
}
