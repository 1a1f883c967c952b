//! Group repository - the typed view of the `groups` key.
//!
//! The whole group list is stored as one JSON array. Every mutation is a
//! read-modify-write of that array, serialized by a lock shared between clones of
//! the repository. Writers outside this repository are not coordinated.

use super::model::Group;
use super::store::KeyValueStore;
use crate::errors::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Key under which the serialized group list is stored.
pub const GROUPS_KEY: &str = "groups";

/// Loads and saves groups through an injected key-value store.
#[derive(Debug, Clone)]
pub struct GroupRepository<S> {
    store: S,
    write_lock: Arc<Mutex<()>>,
}

impl<S: KeyValueStore> GroupRepository<S> {
    /// Creates a repository over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The underlying store, for session data kept next to the groups.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Loads every group. A missing key means no groups yet.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<Group>> {
        let Some(data) = self.store.get(GROUPS_KEY).await? else {
            return Ok(Vec::new());
        };
        let groups: Vec<Group> = serde_json::from_str(&data)?;
        debug!(count = groups.len(), "Loaded groups");
        Ok(groups)
    }

    /// Loads every group that passes validation, skipping the rest.
    #[instrument(skip(self))]
    pub async fn load_readable(&self) -> Result<Vec<Group>> {
        let groups: Vec<Group> = self
            .stored_entries()
            .await?
            .into_iter()
            .filter_map(|entry| {
                serde_json::from_value(entry)
                    .inspect_err(|e| warn!("Skipping stored group that failed validation: {e}"))
                    .ok()
            })
            .collect();
        debug!(count = groups.len(), "Loaded readable groups");
        Ok(groups)
    }

    /// Replaces the stored group list.
    #[instrument(skip(self, groups), fields(count = groups.len()))]
    pub async fn save(&self, groups: &[Group]) -> Result<()> {
        let data = serde_json::to_string(groups)?;
        self.store.set(GROUPS_KEY, &data).await
    }

    /// Finds a single group by id.
    ///
    /// Only the matching entry is validated, so one corrupted group does not hide the
    /// others. A group that is absent or fails validation is reported as
    /// [`Error::GroupNotFound`].
    #[instrument(skip(self))]
    pub async fn find_group(&self, id: &str) -> Result<Group> {
        let not_found = || Error::GroupNotFound { id: id.to_string() };

        let entry = self
            .stored_entries()
            .await?
            .into_iter()
            .find(|entry| entry_field(entry, "id") == Some(id))
            .ok_or_else(not_found)?;

        serde_json::from_value(entry).map_err(|e| {
            warn!("Stored group failed validation: {e}");
            not_found()
        })
    }

    /// Finds a group by exact id, falling back to the first group with that name.
    ///
    /// Resolution scans raw entries, so corrupted groups elsewhere in the list do not
    /// affect it.
    #[instrument(skip(self))]
    pub async fn find_group_by_id_or_name(&self, key: &str) -> Result<Group> {
        let entries = self.stored_entries().await?;
        let id = entries
            .iter()
            .filter_map(|entry| entry_field(entry, "id"))
            .find(|id| *id == key)
            .or_else(|| {
                entries
                    .iter()
                    .filter(|entry| entry_field(entry, "name") == Some(key))
                    .find_map(|entry| entry_field(entry, "id"))
            })
            .ok_or_else(|| Error::GroupNotFound { id: key.to_string() })?;

        self.find_group(id).await
    }

    /// Applies `change` to the whole group list and saves it, holding the write lock
    /// across the read-modify-write.
    ///
    /// Returns whatever `change` returns. Nothing is written if it fails.
    pub async fn modify<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Group>) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut groups = self.load().await?;
        let result = change(&mut groups)?;
        self.save(&groups).await?;
        Ok(result)
    }

    /// Applies `update` to the group with `id` and saves the whole list.
    ///
    /// Returns whatever `update` returns. Nothing is written if it fails.
    pub async fn update_group<T, F>(&self, id: &str, update: F) -> Result<T>
    where
        F: FnOnce(&mut Group) -> Result<T> + Send,
        T: Send,
    {
        self.modify(|groups| {
            let group = groups
                .iter_mut()
                .find(|g| g.id == id)
                .ok_or_else(|| Error::GroupNotFound { id: id.to_string() })?;
            update(group)
        })
        .await
    }

    /// Stored entries as raw JSON. An unreadable list is logged and treated as empty.
    async fn stored_entries(&self) -> Result<Vec<Value>> {
        let Some(data) = self.store.get(GROUPS_KEY).await? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            warn!("Stored group list is unreadable: {e}");
            Vec::new()
        }))
    }
}

fn entry_field<'a>(entry: &'a Value, field: &str) -> Option<&'a str> {
    entry.get(field).and_then(Value::as_str)
}
