#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use split_buddy::{
    bot::{self, BotData},
    config::{database, settings},
    core::{group, repository::GroupRepository, store::SeaOrmStore},
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = settings::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        balance_mode = ?app_config.settings.balance_mode,
        seed_groups = app_config.groups.len(),
        "Configuration loaded."
    );

    // 4. Connect to the database and make sure the key-value table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    let repository = GroupRepository::new(SeaOrmStore::new(db));

    // 5. Seed configured groups that do not exist yet
    group::seed_groups(&repository, &app_config.groups)
        .await
        .inspect_err(|e| error!("Failed to seed groups: {}", e))?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(repository, app_config.settings)).await
}
