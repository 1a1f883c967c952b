//! Username "login".
//!
//! There is no authentication: logging in just records which username is acting,
//! so it can be added to new groups and offered as the default payer.

use super::store::KeyValueStore;
use crate::errors::{Error, Result};
use tracing::info;

/// Key holding the current username for a single-user store.
pub const USERNAME_KEY: &str = "username";

/// Session key for one account of a multi-user front end.
#[must_use]
pub fn session_key(account_id: &str) -> String {
    format!("{USERNAME_KEY}:{account_id}")
}

/// Records `username` as the acting user under `key`. Returns the trimmed name.
pub async fn login<S: KeyValueStore>(store: &S, key: &str, username: &str) -> Result<String> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::MissingField { field: "username" });
    }
    store.set(key, username).await?;
    info!(key, username, "User logged in");
    Ok(username.to_string())
}

/// The acting username stored under `key`, if someone has logged in.
pub async fn current_user<S: KeyValueStore>(store: &S, key: &str) -> Result<Option<String>> {
    Ok(store.get(key).await?.filter(|u| !u.is_empty()))
}
