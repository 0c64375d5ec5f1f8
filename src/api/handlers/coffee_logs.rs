//! Coffee log handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::dto::{CoffeeLogEntry, CoffeeLogQuery, LogCoffeeRequest};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::state::AppState;
use crate::core::coffee;
use crate::entities;
use crate::errors::Result;

/// GET /api/v1/coffee-logs?user_id=...&limit=...
pub async fn list_logs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CoffeeLogQuery>,
) -> Result<Json<Vec<CoffeeLogEntry>>> {
    let logs = coffee::get_user_coffee_logs(&state.database, query.user_id, query.limit).await?;
    let entries = logs
        .into_iter()
        .map(|(log, coffee_box)| CoffeeLogEntry {
            log,
            box_name: coffee_box.map(|b| b.name),
        })
        .collect();
    Ok(Json(entries))
}

/// POST /api/v1/coffee-logs
pub async fn log_coffee(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LogCoffeeRequest>,
) -> Result<(StatusCode, Json<entities::coffee_log::Model>)> {
    let log = coffee::log_coffee(&state.database, req.user_id, req.box_id).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// DELETE /api/v1/coffee-logs/:id
pub async fn delete_log(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode> {
    coffee::delete_coffee_log(&state.database, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
