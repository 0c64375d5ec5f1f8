//! User lookup handlers.

use axum::Json;
use axum::extract::State;

use crate::api::extract::ApiPath;
use crate::api::state::AppState;
use crate::core::user;
use crate::entities;
use crate::errors::{Error, Result};

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<entities::user::Model>>> {
    let users = user::get_all_active_users(&state.database).await?;
    Ok(Json(users))
}

/// GET /api/v1/users/:external_id
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(external_id): ApiPath<String>,
) -> Result<Json<entities::user::Model>> {
    let found = user::get_user_by_external_id(&state.database, &external_id)
        .await?
        .ok_or(Error::UserNotFound { id: external_id })?;
    Ok(Json(found))
}
