//! Payment handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::dto::{CreatePaymentRequest, PaymentQuery};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::state::AppState;
use crate::core::payment;
use crate::entities;
use crate::errors::{Error, Result};

/// GET /api/v1/payments?user_id=... or ?box_id=...
pub async fn list_payments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PaymentQuery>,
) -> Result<Json<Vec<entities::payment::Model>>> {
    let payments = match (query.user_id, query.box_id) {
        (Some(user_id), None) => payment::get_user_payments(&state.database, user_id).await?,
        (None, Some(box_id)) => payment::get_box_payments(&state.database, box_id).await?,
        _ => return Err(Error::invalid("exactly one of user_id or box_id is required")),
    };
    Ok(Json(payments))
}

/// POST /api/v1/payments
pub async fn create_payment(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<entities::payment::Model>)> {
    let created =
        payment::create_payment(&state.database, req.user_id, req.box_id, req.amount).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/v1/payments/:id/paid
pub async fn mark_paid(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<entities::payment::Model>> {
    let paid = payment::mark_paid(&state.database, id).await?;
    Ok(Json(paid))
}
