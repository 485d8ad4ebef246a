use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::{AuthenticatedUser, RequestId},
    models::Recommendations,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommends products for the authenticated caller
///
/// The only input is the bearer credential; a request body, if any, is ignored.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        "Processing recommendation request"
    );

    let response = state.pipeline.recommend(user_id).await?;

    tracing::info!(
        request_id = %request_id,
        recommended = response.recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(response))
}
