//! Autocomplete handlers for Discord slash command parameters.
//!
//! Box parameters are numeric IDs. The suggestions show the box name and its
//! remaining cups while submitting the ID as the value.

use crate::{bot::BotData, core::coffee_box, errors::Error};
use poise::serenity_prelude as serenity;

/// Suggests active boxes whose ID or name matches the partial input.
///
/// Returns up to 25 choices (the Discord limit), oldest box first.
pub async fn autocomplete_box_id(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let db = &ctx.data().database;

    let Ok(stats) = coffee_box::get_active_box_stats(db).await else {
        return Vec::new();
    };

    let partial_lower = partial.trim().to_lowercase();

    stats
        .into_iter()
        .filter(|s| {
            partial_lower.is_empty()
                || s.coffee_box.id.to_string().starts_with(&partial_lower)
                || s.coffee_box.name.to_lowercase().contains(&partial_lower)
        })
        .take(25) // Discord autocomplete limit
        .map(|s| {
            let label = format!(
                "#{} {} ({} cups left)",
                s.coffee_box.id, s.coffee_box.name, s.remaining_cups
            );
            serenity::AutocompleteChoice::new(label, s.coffee_box.id)
        })
        .collect()
}
