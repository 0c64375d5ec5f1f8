use coffee_cups::{
    api, bot,
    config::{database, settings},
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::env;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file (non-fatal, env vars can be set externally)
    let dotenv_loaded = dotenv().is_ok();

    // 2. Load the application configuration; it decides the default log level
    let (app_config, config_source) = settings::load_app_configuration()?;

    // 3. Initialize tracing. RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.log_level)),
        )
        .init();
    info!(dotenv_loaded, "Starting coffee-cups");
    match &config_source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }

    // 4. Initialize database and schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Ctrl-C flips the shutdown flag for the HTTP server
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
        let _ = shutdown_tx.send(true);
    });

    let mut tasks = tokio::task::JoinSet::new();

    // 6. HTTP API
    if app_config.server.enabled {
        let server_config = app_config.server.clone();
        let server_db = db.clone();
        let mut rx = shutdown_rx.clone();
        tasks.spawn(async move {
            let shutdown = async move {
                let _ = rx.wait_for(|stop| *stop).await;
            };
            api::run_server(server_config, server_db, shutdown).await
        });
    }

    // 7. Discord bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in AppConfig
    if app_config.bot.enabled {
        match env::var("DISCORD_BOT_TOKEN") {
            Ok(token) => {
                let bot_config = app_config.bot.clone();
                let bot_db = db.clone();
                let mut rx = shutdown_rx.clone();
                tasks.spawn(async move {
                    tokio::select! {
                        result = bot::run_bot(token, bot_config, bot_db) => result,
                        _ = rx.wait_for(|stop| *stop) => Ok(()),
                    }
                });
            }
            Err(e) => {
                error!("DISCORD_BOT_TOKEN not found: {}", e);
                if !app_config.server.enabled {
                    return Err(Error::EnvVar(e));
                }
                warn!("Continuing with the HTTP API only");
            }
        }
    }

    if tasks.is_empty() {
        warn!("Both the HTTP API and the bot are disabled, nothing to run");
        return Ok(());
    }

    // The first failing front-end stops the process
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("Service stopped with error: {}", e);
                return Err(e);
            }
            Err(e) => {
                error!("Service task panicked: {}", e);
                return Err(Error::Io(std::io::Error::other(e)));
            }
        }
    }

    info!("Shut down cleanly");
    Ok(())
}
