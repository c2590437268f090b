//! The favorites list and its persistence.
//!
//! A favorite is a plugin identifier present in the persisted list. The
//! list behaves as a set: inserts deduplicate, removals of non-members are
//! no-ops. Display order always follows the plugin inventory, so the order
//! kept here carries no meaning beyond stability of the stored file.

mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::settings::SettingsStore;

pub use view::{FAVORITE_ACTION_KEY, RenderPass, RowAction, decorate_row};

/// Settings key under which the favorites list is persisted.
pub const SETTINGS_KEY: &str = "favorite_plugins";

/// An ordered, duplicate-free list of favorited plugin identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteList(Vec<String>);

impl FavoriteList {
    /// Build a list from stored identifiers, dropping duplicates.
    ///
    /// The no-duplicates invariant must hold no matter what was persisted
    /// (a hand-edited settings file may repeat entries).
    pub fn from_stored(ids: Vec<String>) -> Self {
        let mut list = Self::default();
        for id in ids {
            if !list.contains(&id) {
                list.0.push(id);
            }
        }
        list
    }

    /// Whether `id` is favorited.
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|entry| entry == id)
    }

    /// Return the list with `id` inserted. Inserting a member is a no-op.
    pub fn add(mut self, id: &str) -> Self {
        if !self.contains(id) {
            self.0.push(id.to_string());
        }
        self
    }

    /// Return the list with `id` absent. Removing a non-member is a no-op.
    pub fn remove(mut self, id: &str) -> Self {
        self.0.retain(|entry| entry != id);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Reads and writes the favorites list through the settings store.
#[derive(Clone)]
pub struct FavoritesService {
    settings: Arc<dyn SettingsStore>,
}

impl FavoritesService {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Current favorites. A missing or malformed persisted value yields an
    /// empty list; this never fails.
    pub async fn get_all(&self) -> FavoriteList {
        let value = self.settings.get(SETTINGS_KEY, Value::Array(Vec::new())).await;

        let ids = value
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        FavoriteList::from_stored(ids)
    }

    /// Persist the list, overwriting any previous value.
    pub async fn persist(&self, list: &FavoriteList) -> Result<()> {
        let value = serde_json::to_value(list).context("failed to serialize favorites list")?;
        self.settings.set(SETTINGS_KEY, value).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::settings::JsonFileSettings;
    use serde_json::json;

    fn list(ids: &[&str]) -> FavoriteList {
        FavoriteList::from_stored(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn add_is_idempotent() {
        let once = FavoriteList::default().add("akismet/akismet.php");
        let twice = once.clone().add("akismet/akismet.php");

        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let base = list(&["a", "b"]);
        let once = base.clone().remove("a");
        let twice = once.clone().remove("a");

        assert_eq!(once, twice);
        assert_eq!(once, list(&["b"]));
    }

    #[test]
    fn add_then_remove_round_trips_to_empty() {
        let result = FavoriteList::default()
            .add("akismet/akismet.php")
            .remove("akismet/akismet.php");

        assert!(result.is_empty());
    }

    #[test]
    fn remove_of_non_member_is_a_noop() {
        let base = list(&["a"]);
        assert_eq!(base.clone().remove("missing"), base);
    }

    #[test]
    fn stored_duplicates_are_dropped() {
        let loaded = list(&["a", "b", "a", "a", "c"]);
        assert_eq!(loaded, list(&["a", "b", "c"]));
    }

    #[tokio::test]
    async fn get_all_on_empty_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Arc::new(JsonFileSettings::open(&dir.path().join("s.json")).unwrap());
        let service = FavoritesService::new(settings);

        assert!(service.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn get_all_tolerates_malformed_value() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Arc::new(JsonFileSettings::open(&dir.path().join("s.json")).unwrap());
        settings
            .set(SETTINGS_KEY, json!({"not": "a list"}))
            .await
            .unwrap();

        let service = FavoritesService::new(settings);
        assert!(service.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn persist_then_get_all_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Arc::new(JsonFileSettings::open(&dir.path().join("s.json")).unwrap());
        let service = FavoritesService::new(settings);

        let favorites = list(&["alpha", "beta"]);
        service.persist(&favorites).await.unwrap();

        assert_eq!(service.get_all().await, favorites);
    }
}
