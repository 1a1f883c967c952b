//! Group business logic - creating, listing and seeding groups.

use super::model::{Group, Member};
use super::repository::GroupRepository;
use super::store::KeyValueStore;
use crate::config::settings::GroupSeed;
use crate::errors::{Error, Result};
use std::collections::HashSet;
use tracing::info;

/// Splits comma-separated member text into trimmed, non-empty, unique names.
///
/// The first occurrence of a name wins; comparison is exact and case-sensitive.
#[must_use]
pub fn parse_member_list(text: &str) -> Vec<Member> {
    let mut seen = HashSet::new();
    text.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty() && seen.insert(*m))
        .map(str::to_string)
        .collect()
}

/// Builds a group, adding `current_user` to the members if they are missing.
pub fn build_group(
    name: &str,
    mut members: Vec<Member>,
    current_user: Option<&str>,
) -> Result<Group> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::MissingField { field: "name" });
    }
    if members.is_empty() {
        return Err(Error::MissingField { field: "members" });
    }
    if let Some(user) =
        current_user.filter(|u| !u.is_empty() && !members.iter().any(|m| m.as_str() == *u))
    {
        members.push(user.to_string());
    }
    Ok(Group::new(name.to_string(), members))
}

/// Creates a group from comma-separated member text and appends it to the store.
///
/// Group names are unique; a name already in use is rejected.
pub async fn create_group<S: KeyValueStore>(
    repo: &GroupRepository<S>,
    name: &str,
    members_text: &str,
    current_user: Option<&str>,
) -> Result<Group> {
    let group = build_group(name, parse_member_list(members_text), current_user)?;

    repo.modify(|groups| {
        if groups.iter().any(|g| g.name == group.name) {
            return Err(Error::DuplicateGroupName {
                name: group.name.clone(),
            });
        }
        groups.push(group.clone());
        Ok(())
    })
    .await?;

    info!(
        group_id = %group.id,
        name = %group.name,
        members = group.members.len(),
        "Group created"
    );
    Ok(group)
}

/// Every readable stored group, in creation order.
pub async fn list_groups<S: KeyValueStore>(repo: &GroupRepository<S>) -> Result<Vec<Group>> {
    repo.load_readable().await
}

/// Sum of all expense amounts across `groups`.
#[must_use]
pub fn overall_total(groups: &[Group]) -> f64 {
    groups.iter().map(Group::total).sum()
}

/// Creates configured groups whose names do not exist yet.
///
/// Returns the number of groups created.
pub async fn seed_groups<S: KeyValueStore>(
    repo: &GroupRepository<S>,
    seeds: &[GroupSeed],
) -> Result<usize> {
    let created = repo
        .modify(|groups| {
            let mut created = 0;
            for seed in seeds {
                if groups.iter().any(|g| g.name == seed.name.trim()) {
                    continue;
                }
                let members = parse_member_list(&seed.members.join(","));
                groups.push(build_group(&seed.name, members, None)?);
                created += 1;
            }
            Ok(created)
        })
        .await?;

    if created > 0 {
        info!("Seeded {created} group(s) from configuration");
    }
    Ok(created)
}
