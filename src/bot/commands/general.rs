//! General Discord commands - start, ping and help.
//! These commands need no database access beyond registering the author.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, ensure_user},
        errors::{Error, Result},
    };

    /// Registers you with the bot and says hello.
    #[poise::command(slash_command, prefix_command)]
    pub async fn start(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ensure_user(ctx).await?;
        ctx.say(format!(
            "Welcome {}! I'm your coffee tracking bot. Use `/help` to see available commands.",
            user.shown_name()
        ))
        .await?;
        Ok(())
    }

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_user(ctx).await?;
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_user(ctx).await?;
        let help_text = "**☕ Coffee Cups Help**\n\
        Track who drinks what from the shared capsule boxes.\n\n\
        **Everyday Commands**\n\
        • `/boxes` - Shows the available boxes and how many cups are left.\n\
        • `/coffee <box>` - Logs one cup from a box.\n\
        • `/undo` - Removes your most recent cup.\n\
        • `/status` - Shows your recent cups and what you owe.\n\
        • `/debt` - Shows what you owe per box.\n\
        • `/settle <box>` - Records a payment for your share of a box.\n\n\
        **Management Commands**\n\
        • `/box_manage <subcommand>` - Manage boxes (add, list, deactivate).\n\
        • `/payment_manage <subcommand>` - Manage payments (list, mark_paid).\n\n\
        **Utility Commands**\n\
        • `/start` - Registers you with the bot.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Your share of a box is its price divided by its cups, times the cups you took.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
