//! Coffee logging workflow - "user consumes a cup from box X".
//!
//! Logging checks the box is active and has capacity, then inserts the log.
//! The check, the insert and a recount of the box all run inside one database
//! transaction. When two requests race for the last cup, the recount catches
//! the overshoot and the losing request is rolled back with
//! [`Error::BoxExhausted`], so used cups never exceed the box's capacity.

use crate::{
    core::{coffee_box, user},
    entities::{CoffeeBox, CoffeeLog, coffee_box as box_entity, coffee_log},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};

/// Logs one cup consumed by `user_id` from `box_id`.
///
/// Preconditions, checked in order:
/// 1. the box exists ([`Error::BoxNotFound`]) and is active ([`Error::BoxInactive`])
/// 2. the box has remaining cups ([`Error::BoxExhausted`])
/// 3. the user exists ([`Error::UserNotFound`])
///
/// Nothing but the new log row is written.
#[instrument(skip(db))]
pub async fn log_coffee(
    db: &DatabaseConnection,
    user_id: i64,
    box_id: i64,
) -> Result<coffee_log::Model> {
    let txn = db.begin().await?;

    let coffee_box = coffee_box::get_box_by_id(&txn, box_id)
        .await?
        .ok_or(Error::BoxNotFound { id: box_id })?;

    if !coffee_box.is_active {
        return Err(Error::BoxInactive { id: box_id });
    }

    if coffee_box::remaining_cups(&txn, &coffee_box).await? <= 0 {
        return Err(Error::BoxExhausted {
            id: box_id,
            total_cups: coffee_box.total_cups,
        });
    }

    if user::get_user_by_id(&txn, user_id).await?.is_none() {
        return Err(Error::UserNotFound {
            id: user_id.to_string(),
        });
    }

    let new_log = coffee_log::ActiveModel {
        user_id: Set(user_id),
        box_id: Set(box_id),
        logged_at: Set(chrono::Utc::now()),
        is_deleted: Set(false),
        ..Default::default()
    };
    let created = new_log.insert(&txn).await?;

    // A concurrent writer may have taken the last cup between check and insert
    if coffee_box::remaining_cups(&txn, &coffee_box).await? < 0 {
        warn!("Concurrent log overshot box capacity, rolling back");
        txn.rollback().await?;
        return Err(Error::BoxExhausted {
            id: box_id,
            total_cups: coffee_box.total_cups,
        });
    }

    txn.commit().await?;
    info!(log_id = created.id, "Coffee logged");
    Ok(created)
}

/// Counts the non-deleted logs of one user against one box.
pub async fn count_user_logs<C>(db: &C, user_id: i64, box_id: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let count = CoffeeLog::find()
        .filter(coffee_log::Column::UserId.eq(user_id))
        .filter(coffee_log::Column::BoxId.eq(box_id))
        .filter(coffee_log::Column::IsDeleted.eq(false))
        .count(db)
        .await?;
    Ok(i64::try_from(count)?)
}

/// Retrieves a user's non-deleted logs, newest first, each with its box.
///
/// `limit` of `None` or `Some(0)` returns the full history.
pub async fn get_user_coffee_logs(
    db: &DatabaseConnection,
    user_id: i64,
    limit: Option<u64>,
) -> Result<Vec<(coffee_log::Model, Option<box_entity::Model>)>> {
    let mut query = CoffeeLog::find()
        .filter(coffee_log::Column::UserId.eq(user_id))
        .filter(coffee_log::Column::IsDeleted.eq(false))
        .order_by_desc(coffee_log::Column::LoggedAt)
        .order_by_desc(coffee_log::Column::Id);

    if let Some(limit) = limit.filter(|l| *l > 0) {
        query = query.limit(limit);
    }

    query
        .find_also_related(CoffeeBox)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a non-deleted log by ID.
pub async fn get_coffee_log_by_id(
    db: &DatabaseConnection,
    log_id: i64,
) -> Result<Option<coffee_log::Model>> {
    CoffeeLog::find_by_id(log_id)
        .filter(coffee_log::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Soft-deletes a log. The cup becomes available again and the user's debt
/// for the box drops by one cup.
///
/// # Errors
/// Returns [`Error::CoffeeLogNotFound`] if the log does not exist or is
/// already deleted.
#[instrument(skip(db))]
pub async fn delete_coffee_log(
    db: &DatabaseConnection,
    log_id: i64,
) -> Result<coffee_log::Model> {
    let existing = get_coffee_log_by_id(db, log_id)
        .await?
        .ok_or(Error::CoffeeLogNotFound { id: log_id })?;

    let mut active: coffee_log::ActiveModel = existing.into();
    active.is_deleted = Set(true);
    let deleted = active.update(db).await?;
    info!("Coffee log deleted");
    Ok(deleted)
}

/// The user's most recent non-deleted log, if any.
pub async fn get_last_user_log(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Option<coffee_log::Model>> {
    CoffeeLog::find()
        .filter(coffee_log::Column::UserId.eq(user_id))
        .filter(coffee_log::Column::IsDeleted.eq(false))
        .order_by_desc(coffee_log::Column::LoggedAt)
        .order_by_desc(coffee_log::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}
