//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't touch the store
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    pub(crate) const HELP_TEXT: &str = "**SplitBuddy Help**\n\
        Split shared expenses and see who owes whom.\n\n\
        **Getting Started**\n\
        • `/login <username>` - Sets the username you act as.\n\
        • `/whoami` - Shows your current username.\n\n\
        **Groups**\n\
        • `/creategroup <name> <members>` - Creates a group from comma-separated members; you are added automatically. Names must be unique.\n\
        • `/groups` - Lists all groups with their totals.\n\
        • `/group <group>` - Shows a group's expenses and balances.\n\n\
        **Expenses**\n\
        • `/addexpense <group> <title> <amount> [split] [shares] [payer] [description] [category] [date]` - \
        Records an expense. Custom splits take shares like `alice=60, bob=40`.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(HELP_TEXT).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
