//! Box inventory handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::dto::CreateBoxRequest;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::state::AppState;
use crate::core::coffee_box::{self, BoxStats};
use crate::entities;
use crate::errors::Result;

/// GET /api/v1/boxes
pub async fn list_boxes(State(state): State<AppState>) -> Result<Json<Vec<BoxStats>>> {
    let stats = coffee_box::get_active_box_stats(&state.database).await?;
    Ok(Json(stats))
}

/// POST /api/v1/boxes
pub async fn create_box(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateBoxRequest>,
) -> Result<(StatusCode, Json<entities::coffee_box::Model>)> {
    let created = coffee_box::create_box(
        &state.database,
        req.name,
        req.total_cups,
        req.price,
        req.created_by,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/boxes/:id
pub async fn get_box(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<BoxStats>> {
    let stats = coffee_box::get_box_stats(&state.database, id).await?;
    Ok(Json(stats))
}

/// POST /api/v1/boxes/:id/deactivate
pub async fn deactivate_box(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<entities::coffee_box::Model>> {
    let retired = coffee_box::deactivate_box(&state.database, id).await?;
    Ok(Json(retired))
}
