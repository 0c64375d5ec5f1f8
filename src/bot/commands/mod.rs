//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

use crate::{bot::BotData, errors::Error};

/// Box listing and management commands
pub mod boxes;

/// Cup logging, status and debt commands
pub mod consumption;

/// General utility commands
pub mod general;

/// Payment commands
pub mod payments;

// Export commands
pub use boxes::*;
pub use consumption::*;
pub use general::*;
pub use payments::*;

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        start(),
        ping(),
        help(),
        log_cup(),
        undo(),
        status(),
        debt(),
        settle(),
        boxes(),
        box_manage(),
        payment_manage(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_are_unique() {
        let commands = all();
        let mut names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"coffee"));
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_box_manage_subcommands() {
        let cmd = box_manage();
        let subs: Vec<&str> = cmd.subcommands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(subs, vec!["add", "list", "deactivate"]);
    }

    #[test]
    fn test_every_command_registers_author() {
        let sources = [
            include_str!("general.rs"),
            include_str!("consumption.rs"),
            include_str!("boxes.rs"),
            include_str!("payments.rs"),
        ];
        for source in sources {
            // Each chunk runs from one command fn to the next
            for chunk in source.split("pub async fn ").skip(1) {
                let name = chunk.split('(').next().unwrap_or_default();
                assert!(
                    chunk.contains("ensure_user(ctx)"),
                    "command `{name}` does not register its author"
                );
            }
        }
    }
}
