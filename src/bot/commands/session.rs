//! Session Discord commands - `login` and `whoami`.
//!
//! Logging in only records which username a Discord account acts as; there is no
//! password or verification.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, reply_rejection},
        core::session,
        errors::{Error, Result},
    };

    /// Sets the username you act as in groups and expenses.
    #[poise::command(slash_command, prefix_command)]
    pub async fn login(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your username"] username: String,
    ) -> Result<()> {
        let key = session::session_key(&ctx.author().id.to_string());
        match session::login(ctx.data().repository.store(), &key, &username).await {
            Ok(name) => {
                ctx.say(format!("✅ Logged in as **{name}**")).await?;
                Ok(())
            }
            Err(e) => reply_rejection(ctx, e).await,
        }
    }

    /// Shows the username you are logged in as.
    #[poise::command(slash_command, prefix_command)]
    pub async fn whoami(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let account_id = ctx.author().id.to_string();
        match ctx.data().acting_user(&account_id).await? {
            Some(name) => ctx.say(format!("You are logged in as **{name}**")).await?,
            None => ctx.say("You are not logged in. Use `/login <username>`.").await?,
        };
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
