//! Debt calculation and payment recording.
//!
//! Debt is never stored: it is recomputed from the coffee logs on every call,
//! so it always matches the current log set. A payment is a separate record of
//! an assessed amount and whether it has been settled; payments are not
//! subtracted from the computed debt.

use crate::{
    core::{coffee, coffee_box, user},
    entities::{CoffeeLog, Payment, coffee_box as box_entity, coffee_log, payment},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::Serialize;
use tracing::{info, instrument};

/// A user's debt for one box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxDebt {
    /// The box the cups came from
    #[serde(rename = "box")]
    pub coffee_box: box_entity::Model,
    /// Number of cups the user logged against the box
    pub cups: i64,
    /// `cups * cost_per_cup`
    pub amount: f64,
}

#[allow(clippy::cast_precision_loss)]
fn debt_for(coffee_box: &box_entity::Model, cups: i64) -> f64 {
    cups as f64 * coffee_box::cost_per_cup(coffee_box)
}

/// Computes what `user_id` owes for `box_id`: their cup count times the box's
/// cost per cup. Read-only.
///
/// # Errors
/// Returns [`Error::BoxNotFound`] if the box does not exist.
#[instrument(skip(db))]
pub async fn calculate_debt(db: &DatabaseConnection, user_id: i64, box_id: i64) -> Result<f64> {
    let coffee_box = coffee_box::get_box_by_id(db, box_id)
        .await?
        .ok_or(Error::BoxNotFound { id: box_id })?;
    let cups = coffee::count_user_logs(db, user_id, box_id).await?;
    Ok(debt_for(&coffee_box, cups))
}

/// Per-box debts for every box the user has logged cups against, by box ID.
pub async fn user_debt_summary(db: &DatabaseConnection, user_id: i64) -> Result<Vec<BoxDebt>> {
    let box_ids: Vec<i64> = CoffeeLog::find()
        .select_only()
        .column(coffee_log::Column::BoxId)
        .distinct()
        .filter(coffee_log::Column::UserId.eq(user_id))
        .filter(coffee_log::Column::IsDeleted.eq(false))
        .order_by_asc(coffee_log::Column::BoxId)
        .into_tuple()
        .all(db)
        .await?;

    let mut debts = Vec::with_capacity(box_ids.len());
    for box_id in box_ids {
        let Some(coffee_box) = coffee_box::get_box_by_id(db, box_id).await? else {
            continue;
        };
        let cups = coffee::count_user_logs(db, user_id, box_id).await?;
        let amount = debt_for(&coffee_box, cups);
        debts.push(BoxDebt {
            coffee_box,
            cups,
            amount,
        });
    }
    Ok(debts)
}

/// Records an assessed, unpaid debt.
///
/// # Errors
/// Returns an error if:
/// - The amount is negative or not finite
/// - The user or the box does not exist
/// - The database insert fails
#[instrument(skip(db))]
pub async fn create_payment(
    db: &DatabaseConnection,
    user_id: i64,
    box_id: i64,
    amount: f64,
) -> Result<payment::Model> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::invalid(format!(
            "Payment amount must be a non-negative number, got {amount}"
        )));
    }

    if user::get_user_by_id(db, user_id).await?.is_none() {
        return Err(Error::UserNotFound {
            id: user_id.to_string(),
        });
    }
    if coffee_box::get_box_by_id(db, box_id).await?.is_none() {
        return Err(Error::BoxNotFound { id: box_id });
    }

    let new_payment = payment::ActiveModel {
        user_id: Set(user_id),
        box_id: Set(box_id),
        amount: Set(amount),
        is_paid: Set(false),
        paid_at: Set(None),
        is_deleted: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = new_payment.insert(db).await?;
    info!(payment_id = created.id, "Payment recorded");
    Ok(created)
}

/// Marks a payment as paid, stamping the current time.
///
/// Marking an already-paid payment succeeds and re-stamps the time.
///
/// # Errors
/// Returns [`Error::PaymentNotFound`] if the payment does not exist.
#[instrument(skip(db))]
pub async fn mark_paid(db: &DatabaseConnection, payment_id: i64) -> Result<payment::Model> {
    let existing = get_payment_by_id(db, payment_id)
        .await?
        .ok_or(Error::PaymentNotFound { id: payment_id })?;

    let mut active: payment::ActiveModel = existing.into();
    active.is_paid = Set(true);
    active.paid_at = Set(Some(chrono::Utc::now()));
    let updated = active.update(db).await?;
    info!("Payment marked as paid");
    Ok(updated)
}

/// Retrieves a non-deleted payment by ID.
pub async fn get_payment_by_id(
    db: &DatabaseConnection,
    payment_id: i64,
) -> Result<Option<payment::Model>> {
    Payment::find_by_id(payment_id)
        .filter(payment::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All of a user's payments, newest first.
pub async fn get_user_payments(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::UserId.eq(user_id))
        .filter(payment::Column::IsDeleted.eq(false))
        .order_by_desc(payment::Column::CreatedAt)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All payments assessed for a box, newest first.
pub async fn get_box_payments(
    db: &DatabaseConnection,
    box_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::BoxId.eq(box_id))
        .filter(payment::Column::IsDeleted.eq(false))
        .order_by_desc(payment::Column::CreatedAt)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::coffee::log_coffee;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_two_cup_box_scenario() -> Result<()> {
        let (db, alice, coffee_box) = setup_with_box(2, 10.0).await?;
        let bob = create_test_user(&db, "2002", "bob").await?;

        log_coffee(&db, alice.id, coffee_box.id).await?;
        assert_eq!(coffee_box::remaining_cups(&db, &coffee_box).await?, 1);
        assert_eq!(calculate_debt(&db, alice.id, coffee_box.id).await?, 5.0);

        log_coffee(&db, alice.id, coffee_box.id).await?;
        assert_eq!(coffee_box::remaining_cups(&db, &coffee_box).await?, 0);
        assert_eq!(calculate_debt(&db, alice.id, coffee_box.id).await?, 10.0);

        let result = log_coffee(&db, bob.id, coffee_box.id).await;
        assert!(matches!(result, Err(Error::BoxExhausted { .. })));
        assert_eq!(calculate_debt(&db, bob.id, coffee_box.id).await?, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_debt_matches_count_times_cost_per_cup() -> Result<()> {
        let (db, user, coffee_box) = setup_with_box(7, 3.5).await?;

        for expected_cups in 1..=5_i64 {
            log_coffee(&db, user.id, coffee_box.id).await?;
            let cups = coffee::count_user_logs(&db, user.id, coffee_box.id).await?;
            assert_eq!(cups, expected_cups);
            #[allow(clippy::cast_precision_loss)]
            let expected = cups as f64 * (coffee_box.price / f64::from(coffee_box.total_cups));
            assert_eq!(calculate_debt(&db, user.id, coffee_box.id).await?, expected);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_debt_unknown_box() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        let result = calculate_debt(&db, user.id, 31).await;
        assert!(matches!(result, Err(Error::BoxNotFound { id: 31 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_deactivation_keeps_debt() -> Result<()> {
        let (db, user, coffee_box) = setup_with_box(4, 8.0).await?;
        log_coffee(&db, user.id, coffee_box.id).await?;

        coffee_box::deactivate_box(&db, coffee_box.id).await?;
        coffee_box::deactivate_box(&db, coffee_box.id).await?;

        assert_eq!(calculate_debt(&db, user.id, coffee_box.id).await?, 2.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_user_debt_summary() -> Result<()> {
        let (db, user, first_box) = setup_with_box(10, 10.0).await?;
        let second_box = create_custom_box(&db, "Ristretto", 4, 2.0, user.id).await?;
        create_custom_box(&db, "Untouched", 4, 2.0, user.id).await?;

        log_coffee(&db, user.id, first_box.id).await?;
        log_coffee(&db, user.id, second_box.id).await?;
        log_coffee(&db, user.id, second_box.id).await?;

        let summary = user_debt_summary(&db, user.id).await?;
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].coffee_box.id, first_box.id);
        assert_eq!(summary[0].cups, 1);
        assert_eq!(summary[0].amount, 1.0);
        assert_eq!(summary[1].coffee_box.id, second_box.id);
        assert_eq!(summary[1].cups, 2);
        assert_eq!(summary[1].amount, 1.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_payment_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_payment(&db, 1, 1, -1.0).await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));

        let result = create_payment(&db, 1, 1, f64::NAN).await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_payment_unknown_references() -> Result<()> {
        let (db, user, coffee_box) = setup_with_box(4, 8.0).await?;

        let result = create_payment(&db, 999, coffee_box.id, 2.0).await;
        assert!(matches!(result, Err(Error::UserNotFound { .. })));

        let result = create_payment(&db, user.id, 999, 2.0).await;
        assert!(matches!(result, Err(Error::BoxNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_lifecycle() -> Result<()> {
        let (db, user, coffee_box) = setup_with_box(4, 8.0).await?;

        let created = create_payment(&db, user.id, coffee_box.id, 4.0).await?;
        assert!(!created.is_paid);
        assert!(created.paid_at.is_none());
        assert_eq!(created.amount, 4.0);

        let paid = mark_paid(&db, created.id).await?;
        assert!(paid.is_paid);
        assert!(paid.paid_at.is_some());
        assert_eq!(paid.amount, 4.0);

        // Marking twice is not an error
        let repaid = mark_paid(&db, created.id).await?;
        assert!(repaid.is_paid);
        assert!(repaid.paid_at.is_some());

        let by_user = get_user_payments(&db, user.id).await?;
        assert_eq!(by_user.len(), 1);
        let by_box = get_box_payments(&db, coffee_box.id).await?;
        assert_eq!(by_box.len(), 1);
        assert_eq!(by_box[0].id, created.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_paid_unknown_payment() -> Result<()> {
        let db = setup_test_db().await?;
        let result = mark_paid(&db, 12).await;
        assert!(matches!(result, Err(Error::PaymentNotFound { id: 12 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_payments_do_not_reduce_computed_debt() -> Result<()> {
        let (db, user, coffee_box) = setup_with_box(2, 10.0).await?;
        log_coffee(&db, user.id, coffee_box.id).await?;

        let debt = calculate_debt(&db, user.id, coffee_box.id).await?;
        let created = create_payment(&db, user.id, coffee_box.id, debt).await?;
        mark_paid(&db, created.id).await?;

        assert_eq!(calculate_debt(&db, user.id, coffee_box.id).await?, 5.0);
        Ok(())
    }
}
