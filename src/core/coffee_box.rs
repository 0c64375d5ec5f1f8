//! Box inventory logic - Registration, depletion and deactivation of boxes.
//!
//! A box's used cups are never stored. They are counted from the non-deleted
//! coffee logs that reference the box, so the inventory figures are always
//! consistent with the log table at read time.

use crate::{
    core::user,
    entities::{CoffeeBox, CoffeeLog, coffee_box, coffee_log},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::{info, instrument};

/// Inventory figures for one box, as shown to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    /// The box itself
    #[serde(rename = "box")]
    pub coffee_box: coffee_box::Model,
    /// Number of non-deleted logs against the box
    pub used_cups: i64,
    /// `total_cups - used_cups`, clamped at zero
    pub remaining_cups: i64,
    /// Price of a single cup
    pub cost_per_cup: f64,
}

/// Registers a new, active box.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - `total_cups` is zero or negative
/// - The price is negative or not finite (NaN, infinity)
/// - The creator does not exist
/// - The database insert fails
#[instrument(skip(db))]
pub async fn create_box(
    db: &DatabaseConnection,
    name: String,
    total_cups: i32,
    price: f64,
    created_by: i64,
) -> Result<coffee_box::Model> {
    if name.trim().is_empty() {
        return Err(Error::invalid("Box name cannot be empty"));
    }
    if total_cups <= 0 {
        return Err(Error::invalid(format!(
            "Total cups must be positive, got {total_cups}"
        )));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(Error::invalid(format!(
            "Price must be a non-negative number, got {price}"
        )));
    }

    if user::get_user_by_id(db, created_by).await?.is_none() {
        return Err(Error::UserNotFound {
            id: created_by.to_string(),
        });
    }

    let now = chrono::Utc::now();
    let new_box = coffee_box::ActiveModel {
        name: Set(name.trim().to_string()),
        total_cups: Set(total_cups),
        price: Set(price),
        is_active: Set(true),
        created_by: Set(created_by),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = new_box.insert(db).await?;
    info!(box_id = created.id, "Box registered");
    Ok(created)
}

/// Finds a non-deleted box by ID, active or not.
pub async fn get_box_by_id<C>(db: &C, box_id: i64) -> Result<Option<coffee_box::Model>>
where
    C: ConnectionTrait,
{
    CoffeeBox::find_by_id(box_id)
        .filter(coffee_box::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all active, non-deleted boxes, oldest first.
pub async fn get_active_boxes(db: &DatabaseConnection) -> Result<Vec<coffee_box::Model>> {
    CoffeeBox::find()
        .filter(coffee_box::Column::IsActive.eq(true))
        .filter(coffee_box::Column::IsDeleted.eq(false))
        .order_by_asc(coffee_box::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deactivates a box. Deactivating an inactive box is a no-op.
///
/// Existing logs and debts are untouched.
///
/// # Errors
/// Returns [`Error::BoxNotFound`] if the box does not exist.
#[instrument(skip(db))]
pub async fn deactivate_box(db: &DatabaseConnection, box_id: i64) -> Result<coffee_box::Model> {
    let existing = get_box_by_id(db, box_id)
        .await?
        .ok_or(Error::BoxNotFound { id: box_id })?;

    if !existing.is_active {
        return Ok(existing);
    }

    let mut active: coffee_box::ActiveModel = existing.into();
    active.is_active = Set(false);
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(db).await?;
    info!("Box deactivated");
    Ok(updated)
}

/// Counts the non-deleted coffee logs against a box.
pub async fn count_logs<C>(db: &C, box_id: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let count = CoffeeLog::find()
        .filter(coffee_log::Column::BoxId.eq(box_id))
        .filter(coffee_log::Column::IsDeleted.eq(false))
        .count(db)
        .await?;
    Ok(i64::try_from(count)?)
}

/// Remaining cups: `total_cups - count_logs`.
///
/// Not clamped. Callers treat anything `<= 0` as empty.
pub async fn remaining_cups<C>(db: &C, coffee_box: &coffee_box::Model) -> Result<i64>
where
    C: ConnectionTrait,
{
    let used = count_logs(db, coffee_box.id).await?;
    Ok(i64::from(coffee_box.total_cups) - used)
}

/// Price of a single cup. `total_cups` is positive for every stored box.
#[must_use]
pub fn cost_per_cup(coffee_box: &coffee_box::Model) -> f64 {
    coffee_box.price / f64::from(coffee_box.total_cups)
}

/// Builds client-facing inventory figures for a box already loaded.
pub async fn stats_for_box(
    db: &DatabaseConnection,
    coffee_box: coffee_box::Model,
) -> Result<BoxStats> {
    let used_cups = count_logs(db, coffee_box.id).await?;
    let remaining_cups = (i64::from(coffee_box.total_cups) - used_cups).max(0);
    let cost_per_cup = cost_per_cup(&coffee_box);
    Ok(BoxStats {
        coffee_box,
        used_cups,
        remaining_cups,
        cost_per_cup,
    })
}

/// Inventory figures for one box.
///
/// # Errors
/// Returns [`Error::BoxNotFound`] if the box does not exist.
pub async fn get_box_stats(db: &DatabaseConnection, box_id: i64) -> Result<BoxStats> {
    let coffee_box = get_box_by_id(db, box_id)
        .await?
        .ok_or(Error::BoxNotFound { id: box_id })?;
    stats_for_box(db, coffee_box).await
}

/// Inventory figures for every active box.
pub async fn get_active_box_stats(db: &DatabaseConnection) -> Result<Vec<BoxStats>> {
    let boxes = get_active_boxes(db).await?;
    let mut stats = Vec::with_capacity(boxes.len());
    for coffee_box in boxes {
        stats.push(stats_for_box(db, coffee_box).await?);
    }
    Ok(stats)
}
