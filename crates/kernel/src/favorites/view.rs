//! Narrowing the inventory to favorites, and row action decoration.

use serde::Serialize;

use super::FavoriteList;
use crate::plugin::PluginRecord;

/// Key the favorite/unfavorite link is appended under in a row's actions.
pub const FAVORITE_ACTION_KEY: &str = "fav";

/// Per-render state for composing the plugin list page.
///
/// The favorites filter must apply exactly once per render: a second
/// invocation within the same pass returns its input unchanged, so the
/// main table below the favorites table shows the full inventory.
#[derive(Debug, Default)]
pub struct RenderPass {
    filtered: bool,
}

impl RenderPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every record whose identifier is not favorited, preserving the
    /// inventory's relative order. Identity on the second and later calls.
    pub fn filter_to_favorites(
        &mut self,
        inventory: Vec<PluginRecord>,
        favorites: &FavoriteList,
    ) -> Vec<PluginRecord> {
        if self.filtered {
            return inventory;
        }
        self.filtered = true;

        inventory
            .into_iter()
            .filter(|record| favorites.contains(&record.name))
            .collect()
    }
}

/// One entry in a row's action links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAction {
    pub key: &'static str,
    pub label: String,
    pub href: String,
}

/// Append the favorite/unfavorite link to a row's actions.
///
/// The offered action is the opposite of the plugin's current state. Pure:
/// the favorites list itself is only read.
pub fn decorate_row(
    plugin: &str,
    mut actions: Vec<RowAction>,
    favorites: &FavoriteList,
    token: &str,
) -> Vec<RowAction> {
    let favorited = favorites.contains(plugin);
    let (action, label) = if favorited {
        ("unfavorite", "Remove from favorites")
    } else {
        ("favorite", "Add to favorites")
    };

    let href = format!(
        "/admin/plugins?action={action}&plugin={}&_token={}",
        urlencoding::encode(plugin),
        urlencoding::encode(token),
    );

    actions.push(RowAction {
        key: FAVORITE_ACTION_KEY,
        label: label.to_string(),
        href,
    });
    actions
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn record(name: &str) -> PluginRecord {
        PluginRecord {
            name: name.to_string(),
            title: name.to_uppercase(),
            description: String::new(),
            version: "1.0.0".to_string(),
            author: String::new(),
        }
    }

    fn favorites(ids: &[&str]) -> FavoriteList {
        FavoriteList::from_stored(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn filter_keeps_only_favorites_in_order() {
        let inventory = vec![record("p1"), record("p2"), record("p3")];
        let mut pass = RenderPass::new();

        let filtered = pass.filter_to_favorites(inventory, &favorites(&["p3", "p1"]));

        let names: Vec<&str> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["p1", "p3"]);
    }

    #[test]
    fn filter_with_single_favorite() {
        let inventory = vec![record("p1"), record("p2"), record("p3")];
        let mut pass = RenderPass::new();

        let filtered = pass.filter_to_favorites(inventory, &favorites(&["p2"]));

        assert_eq!(filtered, vec![record("p2")]);
    }

    #[test]
    fn second_filter_call_in_one_pass_is_identity() {
        let inventory = vec![record("p1"), record("p2")];
        let only = favorites(&["p1"]);
        let mut pass = RenderPass::new();

        let first = pass.filter_to_favorites(inventory.clone(), &only);
        assert_eq!(first.len(), 1);

        // The full inventory passes through untouched on the second call.
        let second = pass.filter_to_favorites(inventory.clone(), &only);
        assert_eq!(second, inventory);
    }

    #[test]
    fn decorate_appends_exactly_one_action() {
        let base = vec![RowAction {
            key: "details",
            label: "Details".to_string(),
            href: "#plugin-p1".to_string(),
        }];

        let decorated = decorate_row("p1", base.clone(), &favorites(&[]), "tok");

        assert_eq!(decorated.len(), base.len() + 1);
        assert_eq!(decorated[1].key, FAVORITE_ACTION_KEY);
    }

    #[test]
    fn decorate_offers_favorite_when_not_favorited() {
        let decorated = decorate_row("p1", Vec::new(), &favorites(&[]), "tok");

        assert!(decorated[0].href.contains("action=favorite"));
        assert_eq!(decorated[0].label, "Add to favorites");
    }

    #[test]
    fn decorate_offers_unfavorite_when_favorited() {
        let decorated = decorate_row("p1", Vec::new(), &favorites(&["p1"]), "tok");

        assert!(decorated[0].href.contains("action=unfavorite"));
        assert_eq!(decorated[0].label, "Remove from favorites");
    }

    #[test]
    fn decorate_escapes_the_identifier() {
        let decorated = decorate_row("akismet/akismet.php", Vec::new(), &favorites(&[]), "tok");

        assert!(decorated[0].href.contains("plugin=akismet%2Fakismet.php"));
    }
}
