//! Server-side plugin list table widget.
//!
//! One widget renders both the favorites sub-table and the main table, so
//! the two share columns and bulk controls. Each instance owns its display
//! totals; `prepare_items` returns them so the caller decides which
//! table's counts feed the page summary.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::favorites::{FavoriteList, RowAction, decorate_row};
use crate::plugin::PluginRecord;
use crate::theme::ThemeEngine;

/// The bulk dropdown's placeholder value meaning "no action selected".
const NO_ACTION: &str = "-1";

/// Display counts for one prepared table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListTotals {
    pub items: usize,
}

/// One display row.
#[derive(Debug, Clone, Serialize)]
struct TableRow {
    name: String,
    title: String,
    description: String,
    version: String,
    author: String,
    is_favorite: bool,
    actions: Vec<RowAction>,
}

/// A plugin list table: prepared rows plus the surrounding bulk form.
pub struct PluginListTable {
    id: String,
    status: String,
    page: u32,
    rows: Vec<TableRow>,
    totals: ListTotals,
}

impl PluginListTable {
    pub fn new(id: &str, status: &str, page: u32) -> Self {
        Self {
            id: id.to_string(),
            status: status.to_string(),
            page,
            rows: Vec::new(),
            totals: ListTotals { items: 0 },
        }
    }

    /// Build display rows for `records` and return the computed totals.
    ///
    /// Every row gets the host's built-in actions plus the
    /// favorite/unfavorite link carrying `toggle_token`.
    pub fn prepare_items(
        &mut self,
        records: &[PluginRecord],
        favorites: &FavoriteList,
        toggle_token: &str,
    ) -> ListTotals {
        self.rows = records
            .iter()
            .map(|record| {
                let base = vec![RowAction {
                    key: "details",
                    label: "Details".to_string(),
                    href: format!("#plugin-{}", record.name),
                }];

                TableRow {
                    name: record.name.clone(),
                    title: record.title.clone(),
                    description: record.description.clone(),
                    version: record.version.clone(),
                    author: record.author.clone(),
                    is_favorite: favorites.contains(&record.name),
                    actions: decorate_row(&record.name, base, favorites, toggle_token),
                }
            })
            .collect();

        self.totals = ListTotals {
            items: self.rows.len(),
        };
        self.totals
    }

    /// Render the table through the shared partial template.
    pub fn render(&self, theme: &ThemeEngine, bulk_token: &str) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("table_id", &self.id);
        context.insert("status", &self.status);
        context.insert("page", &self.page);
        context.insert("rows", &self.rows);
        context.insert("totals", &self.totals);
        context.insert("bulk_token", bulk_token);

        theme
            .tera()
            .render("admin/plugin-table.html", &context)
            .with_context(|| format!("failed to render plugin table '{}'", self.id))
    }

    /// The bulk action selected in a submitted form, if any.
    pub fn current_action(form: &[(String, String)]) -> Option<String> {
        form.iter()
            .find(|(key, _)| key.as_str() == "action")
            .map(|(_, value)| value.clone())
            .filter(|action| !action.is_empty() && action.as_str() != NO_ACTION)
    }

    /// The status filter this table was prepared for.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn totals(&self) -> ListTotals {
        self.totals
    }
}
