//! Debt handlers.

use axum::Json;
use axum::extract::State;

use crate::api::dto::{DebtQuery, DebtResponse};
use crate::api::extract::ApiQuery;
use crate::api::state::AppState;
use crate::core::payment;
use crate::errors::Result;

/// GET /api/v1/debts?user_id=...&box_id=...
///
/// Without `box_id` the response lists every box the user drank from.
pub async fn get_debts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DebtQuery>,
) -> Result<Json<Vec<DebtResponse>>> {
    let db = &state.database;

    let debts = if let Some(box_id) = query.box_id {
        let amount = payment::calculate_debt(db, query.user_id, box_id).await?;
        vec![DebtResponse {
            user_id: query.user_id,
            box_id,
            amount,
        }]
    } else {
        payment::user_debt_summary(db, query.user_id)
            .await?
            .into_iter()
            .map(|debt| DebtResponse {
                user_id: query.user_id,
                box_id: debt.coffee_box.id,
                amount: debt.amount,
            })
            .collect()
    };

    Ok(Json(debts))
}
