//! Consumption Discord commands - logging cups and checking what you owe.
//!
//! Each command registers the author first, then calls into the core modules.
//! Domain errors (empty box, retired box) are answered in the channel.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, ensure_user, handlers::autocomplete, reply_with_error},
        core::{coffee, coffee_box, payment, report},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Logs one cup of coffee from a box.
    #[poise::command(slash_command, prefix_command, rename = "coffee")]
    pub async fn log_cup(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Box the capsule came from"]
        #[autocomplete = "autocomplete::autocomplete_box_id"]
        box_id: i64,
    ) -> Result<()> {
        let user = ensure_user(ctx).await?;
        let db = &ctx.data().database;

        if let Err(e) = coffee::log_coffee(db, user.id, box_id).await {
            return reply_with_error(ctx, e).await;
        }

        let stats = coffee_box::get_box_stats(db, box_id).await?;
        let debt = payment::calculate_debt(db, user.id, box_id).await?;

        ctx.say(format!(
            "☕ Coffee logged!\n\nBox: {}\nRemaining cups: {}\nYour share of this box: {}",
            stats.coffee_box.name,
            stats.remaining_cups,
            report::format_amount(debt)
        ))
        .await?;
        Ok(())
    }

    /// Removes your most recent cup, e.g. after logging by mistake.
    #[poise::command(slash_command, prefix_command)]
    pub async fn undo(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ensure_user(ctx).await?;
        let db = &ctx.data().database;

        let Some(last) = coffee::get_last_user_log(db, user.id).await? else {
            ctx.say("You have no cups to undo.").await?;
            return Ok(());
        };

        if let Err(e) = coffee::delete_coffee_log(db, last.id).await {
            return reply_with_error(ctx, e).await;
        }

        let box_name = coffee_box::get_box_by_id(db, last.box_id)
            .await?
            .map_or_else(|| format!("#{}", last.box_id), |b| b.name);
        ctx.say(format!("↩️ Removed your last cup from {box_name}."))
            .await?;
        Ok(())
    }

    /// Shows your recent cups and your total debt.
    #[poise::command(slash_command, prefix_command)]
    pub async fn status(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ensure_user(ctx).await?;
        let db = &ctx.data().database;

        let user_report = report::generate_user_report(db, user.id, Some(5)).await?;

        if user_report.recent_logs.is_empty() {
            ctx.say("You haven't logged any coffee yet. Use `/coffee <box>` to log your first cup!")
                .await?;
            return Ok(());
        }

        let mut msg = String::from("📊 Your recent coffee logs:\n\n");
        for (log, coffee_box) in &user_report.recent_logs {
            writeln!(msg, "{}", report::format_log_line(log, coffee_box.as_ref()))?;
        }
        write!(
            msg,
            "\nTotal owed: **{}**",
            report::format_amount(user_report.total_debt)
        )?;

        ctx.say(msg).await?;
        Ok(())
    }

    /// Shows what you owe for each box you drank from.
    #[poise::command(slash_command, prefix_command)]
    pub async fn debt(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ensure_user(ctx).await?;
        let db = &ctx.data().database;

        let debts = payment::user_debt_summary(db, user.id).await?;
        if debts.is_empty() {
            ctx.say("You don't owe anything yet.").await?;
            return Ok(());
        }

        let mut msg = String::from("💰 Your share per box:\n\n");
        for box_debt in &debts {
            writeln!(msg, "• {}", report::format_debt_line(box_debt))?;
        }
        let total: f64 = debts.iter().map(|d| d.amount).sum();
        write!(msg, "\nTotal: **{}**", report::format_amount(total))?;

        ctx.say(msg).await?;
        Ok(())
    }

    /// Records a payment for your share of a box that is not yet covered.
    #[poise::command(slash_command, prefix_command)]
    pub async fn settle(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Box to settle"]
        #[autocomplete = "autocomplete::autocomplete_box_id"]
        box_id: i64,
    ) -> Result<()> {
        let user = ensure_user(ctx).await?;
        let db = &ctx.data().database;

        let debt = match payment::calculate_debt(db, user.id, box_id).await {
            Ok(debt) => debt,
            Err(e) => return reply_with_error(ctx, e).await,
        };

        let already_assessed: f64 = payment::get_user_payments(db, user.id)
            .await?
            .iter()
            .filter(|p| p.box_id == box_id)
            .map(|p| p.amount)
            .sum();
        let outstanding = debt - already_assessed;

        if outstanding < 0.005 {
            ctx.say(format!(
                "Nothing new to settle for box #{box_id}. Your share is {}.",
                report::format_amount(debt)
            ))
            .await?;
            return Ok(());
        }

        match payment::create_payment(db, user.id, box_id, outstanding).await {
            Ok(created) => {
                ctx.say(format!(
                    "🧾 Payment #{} recorded: you owe **{}** for box #{box_id}.\n\
                    Once the money is handed over, run `/payment_manage mark_paid {}`.",
                    created.id,
                    report::format_amount(created.amount),
                    created.id
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_with_error(ctx, e).await,
        }
    }
}

// Re-export all commands
pub use inner::*;
