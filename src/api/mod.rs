//! HTTP API layer - axum router, handlers and error mapping.
//!
//! The handlers are thin: they decode the request, call into [`crate::core`]
//! and serialize the result. Domain errors become JSON error bodies through
//! the [`IntoResponse`](axum::response::IntoResponse) impl in [`error`].

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

use std::future::Future;

use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::settings::ServerConfig;
use crate::errors::Result;

pub use router::build_router;
pub use state::AppState;

/// Binds the configured address and serves the API until `shutdown` resolves.
#[instrument(skip(database, shutdown))]
pub async fn run_server<F>(config: ServerConfig, database: DatabaseConnection, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(AppState::new(database));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP API stopped");
    Ok(())
}
