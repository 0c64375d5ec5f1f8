//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{coffee_box, user},
    entities::{self, coffee_log},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

/// Installs a tracing subscriber that writes through the test harness.
/// Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Registers a test user.
pub async fn create_test_user(
    db: &DatabaseConnection,
    external_id: &str,
    username: &str,
) -> Result<entities::user::Model> {
    user::upsert_user(db, external_id, username, None).await
}

/// Creates a box with custom parameters.
pub async fn create_custom_box(
    db: &DatabaseConnection,
    name: &str,
    total_cups: i32,
    price: f64,
    created_by: i64,
) -> Result<entities::coffee_box::Model> {
    coffee_box::create_box(db, name.to_string(), total_cups, price, created_by).await
}

/// Inserts a log directly, bypassing the capacity and activity checks.
/// Use this to build states the workflow would refuse to produce.
pub async fn create_test_log(
    db: &DatabaseConnection,
    user_id: i64,
    box_id: i64,
) -> Result<entities::coffee_log::Model> {
    let log = coffee_log::ActiveModel {
        user_id: Set(user_id),
        box_id: Set(box_id),
        logged_at: Set(chrono::Utc::now()),
        is_deleted: Set(false),
        ..Default::default()
    };
    log.insert(db).await.map_err(Into::into)
}

/// Sets up a database with one user.
/// Returns (db, user) with external ID `"1001"` and username `"alice"`.
pub async fn setup_with_user() -> Result<(DatabaseConnection, entities::user::Model)> {
    let db = setup_test_db().await?;
    let alice = create_test_user(&db, "1001", "alice").await?;
    Ok((db, alice))
}

/// Sets up a database with one user and one active box created by that user.
/// Returns (db, user, box).
pub async fn setup_with_box(
    total_cups: i32,
    price: f64,
) -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::coffee_box::Model,
)> {
    let (db, alice) = setup_with_user().await?;
    let coffee_box = create_custom_box(&db, "Test Box", total_cups, price, alice.id).await?;
    Ok((db, alice, coffee_box))
}
