//! HTTP handlers for the REST API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use skyreport_core::ValidationError;
use skyreport_services::Verdict;

use super::dto::{HealthResponse, SkyConditionParams, SkyConditionQuery, SkyConditionRequest};
use super::error::HttpError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, HttpError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "sky-report".to_string(),
    })
}

/// GET /api/v1/sky-condition?lat=..&lon=..&time=..
pub async fn get_sky_condition(
    State(state): State<AppState>,
    query: Result<Query<SkyConditionQuery>, QueryRejection>,
) -> HandlerResult<Verdict> {
    let Query(query) = query.map_err(|e| ValidationError::InvalidQuery(e.body_text()))?;
    let params = SkyConditionParams::try_from(query)?;
    Ok(Json(evaluate(&state, params).await))
}

/// POST /api/v1/sky-condition with a JSON body
pub async fn post_sky_condition(
    State(state): State<AppState>,
    body: Result<Json<SkyConditionRequest>, JsonRejection>,
) -> HandlerResult<Verdict> {
    let Json(request) = body.map_err(|e| ValidationError::InvalidBody(e.body_text()))?;
    let params = SkyConditionParams::try_from(request)?;
    Ok(Json(evaluate(&state, params).await))
}

async fn evaluate(state: &AppState, params: SkyConditionParams) -> Verdict {
    tracing::info!(
        lat = params.coordinate.latitude,
        lon = params.coordinate.longitude,
        time = ?params.time,
        "Sky condition request"
    );
    state.service.evaluate(params.coordinate, params.time).await
}
