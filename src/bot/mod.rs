//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `SplitBuddy` application,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (group, expense, session, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::Settings,
    core::{repository::GroupRepository, session, store::SeaOrmStore},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::{error, info};

/// Shared data available to all bot commands.
/// This structure holds the group repository and the display settings
/// that commands need to access.
pub struct BotData {
    /// Group repository; session usernames live in the same store
    pub repository: GroupRepository<SeaOrmStore>,
    /// Settings from config.toml
    pub settings: Settings,
}

impl BotData {
    /// Creates a new `BotData` instance with the given repository and settings.
    /// Commands share this repository, and with it the lock that serializes
    /// group writes.
    #[must_use]
    pub const fn new(repository: GroupRepository<SeaOrmStore>, settings: Settings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// The username the given Discord account logged in with, if any.
    pub async fn acting_user(&self, account_id: &str) -> Result<Option<String>> {
        session::current_user(self.repository.store(), &session::session_key(account_id)).await
    }
}

/// Replies with the user-facing text of an input error, or passes other errors on.
pub async fn reply_rejection(
    ctx: poise::Context<'_, BotData, Error>,
    error: Error,
) -> Result<()> {
    if error.is_user_error() {
        ctx.say(format!("❌ {error}")).await?;
        Ok(())
    } else {
        Err(error)
    }
}

/// The acting username of the invoking account, prompting them to log in if there is none.
pub async fn require_login(ctx: poise::Context<'_, BotData, Error>) -> Result<Option<String>> {
    let user = ctx.data().acting_user(&ctx.author().id.to_string()).await?;
    if user.is_none() {
        ctx.say("🔑 Please log in first with `/login <username>`.")
            .await?;
    }
    Ok(user)
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say("❌ Something went wrong, please try again.").await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::login(),
                commands::whoami(),
                commands::creategroup(),
                commands::groups(),
                commands::group(),
                commands::addexpense(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
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
