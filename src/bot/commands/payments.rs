//! Payment Discord commands - `payment_manage`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, ensure_user, reply_with_error},
        core::{coffee_box, payment, report},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for payments.
    #[poise::command(slash_command, subcommands("payment_list", "payment_mark_paid"))]
    pub async fn payment_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_user(ctx).await?;
        let help_text = "Payment command. Available subcommands:\n\
            `/payment_manage list` - List your payments\n\
            `/payment_manage mark_paid` - Mark a payment as paid";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists your payments, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn payment_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ensure_user(ctx).await?;
        let db = &ctx.data().database;

        let payments = payment::get_user_payments(db, user.id).await?;
        if payments.is_empty() {
            ctx.say("You have no payments. Use `/settle <box>` to record one.")
                .await?;
            return Ok(());
        }

        let mut msg = String::from("🧾 Your payments:\n\n");
        for p in &payments {
            let box_name = coffee_box::get_box_by_id(db, p.box_id)
                .await?
                .map_or_else(|| format!("#{}", p.box_id), |b| b.name);
            let state = match p.paid_at {
                Some(paid_at) if p.is_paid => format!("paid {}", paid_at.format("%Y-%m-%d")),
                _ => "unpaid".to_string(),
            };
            writeln!(
                msg,
                "• #{} {box_name}: {} ({state})",
                p.id,
                report::format_amount(p.amount)
            )?;
        }

        ctx.say(msg).await?;
        Ok(())
    }

    /// Marks one of your payments as paid.
    #[poise::command(slash_command, rename = "mark_paid")]
    pub async fn payment_mark_paid(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Payment ID shown by `/payment_manage list`"] payment_id: i64,
    ) -> Result<()> {
        let user = ensure_user(ctx).await?;
        let db = &ctx.data().database;

        // Only the payer may mark their own payment
        match payment::get_payment_by_id(db, payment_id).await? {
            Some(p) if p.user_id == user.id => {}
            _ => {
                return reply_with_error(ctx, Error::PaymentNotFound { id: payment_id }).await;
            }
        }

        match payment::mark_paid(db, payment_id).await {
            Ok(paid) => {
                ctx.say(format!(
                    "✅ Payment #{} of {} marked as paid.",
                    paid.id,
                    report::format_amount(paid.amount)
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
