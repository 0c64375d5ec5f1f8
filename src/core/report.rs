//! Report generation and text formatting.
//!
//! This module assembles per-user consumption reports and provides the text
//! helpers the chat layer uses to render boxes, logs and debts. The functions
//! are framework-agnostic and return plain data or strings.

use crate::{
    core::{coffee, coffee_box::BoxStats, payment},
    entities::{coffee_box, coffee_log, user},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// A user's recent consumption and current debts.
#[derive(Debug, Clone)]
pub struct UserReport {
    /// The user being reported on
    pub user: user::Model,
    /// Most recent logs, newest first, with their boxes
    pub recent_logs: Vec<(coffee_log::Model, Option<coffee_box::Model>)>,
    /// Debt per box the user has logged against
    pub debts: Vec<payment::BoxDebt>,
    /// Sum of all debts
    pub total_debt: f64,
}

/// Builds a report for one user.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Internal ID of the user
/// * `log_limit` - Maximum number of recent logs to include (default 5)
pub async fn generate_user_report(
    db: &DatabaseConnection,
    user_id: i64,
    log_limit: Option<u64>,
) -> Result<UserReport> {
    let user = crate::core::user::get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            id: user_id.to_string(),
        })?;

    let recent_logs =
        coffee::get_user_coffee_logs(db, user_id, Some(log_limit.unwrap_or(5))).await?;
    let debts = payment::user_debt_summary(db, user_id).await?;
    let total_debt: f64 = debts.iter().map(|debt| debt.amount).sum();

    Ok(UserReport {
        user,
        recent_logs,
        debts,
        total_debt,
    })
}

/// Share of a box already consumed, as a percentage.
///
/// Returns 0 for a zero-capacity box and may exceed 100 after an overshoot.
#[must_use]
pub fn calculate_usage_percent(used_cups: i64, total_cups: i32) -> f64 {
    if total_cups <= 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let percent = (used_cups as f64 / f64::from(total_cups)) * 100.0;
    percent
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // clamped_progress is in [0, 100] and length is small, so the result fits
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// Formats a money amount, e.g. `$5.00`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Multi-line summary of a box for the `/boxes` listing.
#[must_use]
pub fn format_box_summary(stats: &BoxStats) -> String {
    let coffee_box = &stats.coffee_box;
    let usage = calculate_usage_percent(stats.used_cups, coffee_box.total_cups);
    format!(
        "**#{id} {name}**\nPrice: {price} ({per_cup} per cup)\nRemaining: {remaining}/{total} cups\n{bar}",
        id = coffee_box.id,
        name = coffee_box.name,
        price = format_amount(coffee_box.price),
        per_cup = format_amount(stats.cost_per_cup),
        remaining = stats.remaining_cups,
        total = coffee_box.total_cups,
        bar = format_progress_bar(usage, None),
    )
}

/// One line for a coffee log, e.g. `☕ Lungo - 2026-01-02 09:15`.
#[must_use]
pub fn format_log_line(log: &coffee_log::Model, coffee_box: Option<&coffee_box::Model>) -> String {
    let box_name = coffee_box.map_or("Unknown box", |b| b.name.as_str());
    format!("☕ {box_name} - {}", log.logged_at.format("%Y-%m-%d %H:%M"))
}

/// One line for a debt, e.g. `Lungo (#3): 2 cups = $1.00`.
#[must_use]
pub fn format_debt_line(debt: &payment::BoxDebt) -> String {
    let cups_word = if debt.cups == 1 { "cup" } else { "cups" };
    format!(
        "{} (#{}): {} {cups_word} = {}",
        debt.coffee_box.name,
        debt.coffee_box.id,
        debt.cups,
        format_amount(debt.amount)
    )
}
