//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module provides autocomplete functionality for command parameters like
//! group names and member names, suggesting valid options as the user types.

use crate::{bot::BotData, core::group, errors::Error};

/// Discord's limit on autocomplete suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Provides autocomplete suggestions for group names.
///
/// Matches the partial input case-insensitively anywhere in the name and
/// returns up to 25 names sorted alphabetically.
pub async fn autocomplete_group_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(groups) = group::list_groups(&ctx.data().repository).await else {
        return Vec::new();
    };

    filter_suggestions(groups.into_iter().map(|g| g.name), partial)
}

/// Provides autocomplete suggestions for member names across all groups.
pub async fn autocomplete_member_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(groups) = group::list_groups(&ctx.data().repository).await else {
        return Vec::new();
    };

    filter_suggestions(groups.into_iter().flat_map(|g| g.members), partial)
}

/// Provides autocomplete suggestions for expense categories.
#[allow(clippy::unused_async)] // poise awaits autocomplete callbacks
pub async fn autocomplete_category(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let categories = [
        "Food",
        "Groceries",
        "Travel",
        "Transport",
        "Rent",
        "Utilities",
        "Entertainment",
        "Shopping",
        "Other",
    ];

    filter_suggestions(categories.iter().map(|c| (*c).to_string()), partial)
}

/// Keeps unique candidates containing `partial` (case-insensitive), sorted, at most 25.
fn filter_suggestions(candidates: impl Iterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = candidates
        .filter(|c| c.to_lowercase().contains(&partial_lower))
        .collect();
    matching.sort();
    matching.dedup();
    matching.truncate(MAX_SUGGESTIONS);
    matching
}
