//! Box Discord commands - `boxes` and `box_manage`.
//!
//! Anyone can list boxes. Adding and retiring boxes goes through the
//! `box_manage` parent command.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, ensure_user, handlers::autocomplete, reply_with_error},
        core::{coffee_box, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Shows the active boxes and how many cups each has left.
    #[poise::command(slash_command, prefix_command)]
    pub async fn boxes(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_user(ctx).await?;
        let db = &ctx.data().database;

        let stats = coffee_box::get_active_box_stats(db).await?;
        if stats.is_empty() {
            ctx.say("No boxes available. Use `/box_manage add` to add one!")
                .await?;
            return Ok(());
        }

        let embed_fields: Vec<(String, String, bool)> = stats
            .iter()
            .map(|s| {
                let summary = report::format_box_summary(s);
                // First line is the bold title, the rest goes into the field body
                let (title, body) = summary.split_once('\n').unwrap_or((summary.as_str(), ""));
                (title.replace("**", ""), body.to_string(), false)
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("☕ Available Boxes")
            .color(0x006F_4E37) // Coffee brown
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Parent command for managing coffee capsule boxes.
    #[poise::command(
        slash_command,
        subcommands("box_add", "box_list", "box_deactivate")
    )]
    pub async fn box_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_user(ctx).await?;
        let help_text = "Box management command. Available subcommands:\n\
            `/box_manage add` - Add a new box\n\
            `/box_manage list` - List active boxes with their usage\n\
            `/box_manage deactivate` - Retire a box so no more cups can be logged";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new box of capsules. You are recorded as its creator.
    #[poise::command(slash_command, rename = "add")]
    pub async fn box_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the box (e.g., 'Lungo 50-pack')"] name: String,
        #[description = "Number of cups in the box"] total_cups: i64,
        #[description = "Price paid for the whole box (e.g., 25.00)"] price: f64,
    ) -> Result<()> {
        let user = ensure_user(ctx).await?;
        let db = &ctx.data().database;

        let Ok(total_cups) = i32::try_from(total_cups) else {
            ctx.say(format!("❌ {total_cups} cups is not a valid box size."))
                .await?;
            return Ok(());
        };

        match coffee_box::create_box(db, name, total_cups, price, user.id).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Box #{} '{}' added: {} cups for {} ({} per cup).",
                    created.id,
                    created.name,
                    created.total_cups,
                    report::format_amount(created.price),
                    report::format_amount(coffee_box::cost_per_cup(&created))
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_with_error(ctx, e).await,
        }
    }

    /// Lists active boxes with id, usage and price per cup.
    #[poise::command(slash_command, rename = "list")]
    pub async fn box_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_user(ctx).await?;
        let db = &ctx.data().database;

        let stats = coffee_box::get_active_box_stats(db).await?;
        if stats.is_empty() {
            ctx.say("No active boxes.").await?;
            return Ok(());
        }

        let lines: Vec<String> = stats
            .iter()
            .map(|s| {
                format!(
                    "#{} {} - {}/{} cups used, {} per cup",
                    s.coffee_box.id,
                    s.coffee_box.name,
                    s.used_cups,
                    s.coffee_box.total_cups,
                    report::format_amount(s.cost_per_cup)
                )
            })
            .collect();

        ctx.say(lines.join("\n")).await?;
        Ok(())
    }

    /// Retires a box. Existing logs still count towards debts.
    #[poise::command(slash_command, rename = "deactivate")]
    pub async fn box_deactivate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Box to retire"]
        #[autocomplete = "autocomplete::autocomplete_box_id"]
        box_id: i64,
    ) -> Result<()> {
        ensure_user(ctx).await?;
        let db = &ctx.data().database;

        match coffee_box::deactivate_box(db, box_id).await {
            Ok(retired) => {
                ctx.say(format!("🗄️ Box #{} '{}' has been retired.", retired.id, retired.name))
                    .await?;
                Ok(())
            }
            Err(e) => reply_with_error(ctx, e).await,
        }
    }
}

// Re-export all commands
pub use inner::*;
