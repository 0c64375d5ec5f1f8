//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! models without hand-written SQL.

use crate::entities::{CoffeeBox, CoffeeLog, Payment, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Default database location used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/coffee_cups.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to [`DEFAULT_DATABASE_URL`] when the variable is not set, creating
/// its `data/` directory on first use.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }
    connect(&database_url).await
}

/// Connects to the given database URL.
#[instrument]
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Opening database connection");
    let db = Database::connect(database_url).await?;
    info!("Database connection established");
    Ok(db)
}

/// Creates all tables that do not exist yet, in dependency order.
///
/// The unique index on `users.external_id` comes from the entity definition.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&*schema.create_table_from_entity(User).if_not_exists()))
        .await?;
    db.execute(builder.build(&*schema.create_table_from_entity(CoffeeBox).if_not_exists()))
        .await?;
    db.execute(builder.build(&*schema.create_table_from_entity(CoffeeLog).if_not_exists()))
        .await?;
    db.execute(builder.build(&*schema.create_table_from_entity(Payment).if_not_exists()))
        .await?;

    debug!("Database tables ensured");
    Ok(())
}
