//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the chat interface for coffee-cups: slash commands,
//! autocomplete handlers, the shared bot context and the client runner.

/// Discord command implementations (coffee, boxes, payments, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::BotConfig,
    core,
    entities::user,
    errors::{Error, ErrorKind, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Registers or refreshes the invoking Discord user.
///
/// Every command calls this first so the author always has a user row.
pub async fn ensure_user(ctx: poise::Context<'_, BotData, Error>) -> Result<user::Model> {
    let author = ctx.author();
    core::user::upsert_user(
        &ctx.data().database,
        &author.id.to_string(),
        &author.name,
        author.global_name.clone(),
    )
    .await
}

/// Chat text for a domain error, or `None` when the error is internal and
/// should be propagated to the framework error handler instead.
#[must_use]
pub fn describe_error(err: &Error) -> Option<String> {
    let text = match err {
        Error::BoxNotFound { id } => {
            format!("❌ Box #{id} does not exist. Use `/boxes` to see available boxes.")
        }
        Error::BoxInactive { id } => {
            format!("❌ Box #{id} has been retired. Use `/boxes` to see available boxes.")
        }
        Error::BoxExhausted { id, total_cups } => {
            format!("❌ Box #{id} is empty, all {total_cups} cups have been used.")
        }
        other if matches!(other.kind(), ErrorKind::NotFound | ErrorKind::InvalidArgument) => {
            format!("❌ {other}")
        }
        _ => return None,
    };
    Some(text)
}

/// Replies with the chat text for a domain error, or hands internal errors
/// back to the caller so the framework error handler sees them.
pub async fn reply_with_error(ctx: poise::Context<'_, BotData, Error>, err: Error) -> Result<()> {
    if let Some(text) = describe_error(&err) {
        ctx.say(text).await?;
        return Ok(());
    }
    ctx.say("Sorry, there was an error processing your request.")
        .await?;
    Err(err)
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
#[instrument(skip(token, database))]
pub async fn run_bot(token: String, config: BotConfig, database: DatabaseConnection) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                if let Some(guild_id) = config.guild_id {
                    poise::builtins::register_in_guild(
                        ctx,
                        &framework.options().commands,
                        serenity::GuildId::new(guild_id),
                    )
                    .await?;
                    info!("Registered commands in guild {}", guild_id);
                } else {
                    poise::builtins::register_globally(ctx, &framework.options().commands)
                        .await?;
                    info!("Registered commands globally");
                }
                Ok(BotData::new(database))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
