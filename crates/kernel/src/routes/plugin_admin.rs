//! Admin routes for the plugin list and its favorites.
//!
//! One page: the favorites sub-table above the full plugin list. Single
//! toggles arrive as query parameters on the page itself and fall through
//! to a normal render; bulk submissions mutate once and redirect back with
//! a count for the notice.

use axum::Router;
use axum::extract::{Query, RawForm, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use serde::Deserialize;
use tower_sessions::Session;
use url::form_urlencoded;

use crate::error::AppResult;
use crate::favorites::RenderPass;
use crate::form::csrf::{BULK_PURPOSE, TOGGLE_PURPOSE, generate_csrf_token};
use crate::list_table::PluginListTable;
use crate::notice;
use crate::plugin;
use crate::state::AppState;

use super::helpers::{render_admin_template, require_admin, require_csrf};

/// Path of the plugin list page; bulk redirects come back here.
const LIST_PATH: &str = "/admin/plugins";

// =============================================================================
// Request data
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Pending single toggle: `favorite` or `unfavorite`.
    action: Option<String>,
    /// Pending single toggle target.
    plugin: Option<String>,
    #[serde(rename = "_token")]
    token: Option<String>,
    /// Bulk result counts, present right after a bulk redirect.
    favorited: Option<String>,
    unfavorited: Option<String>,
    plugin_status: Option<String>,
    paged: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// The plugin list page.
///
/// GET /admin/plugins
async fn list_plugins(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> AppResult<Response> {
    if let Err(redirect) = require_admin(&session).await {
        return Ok(redirect);
    }

    // A toggle link lands back on this page; apply it before rendering.
    if let Some(rejection) = apply_single_toggle(&state, &session, &query).await? {
        return Ok(rejection);
    }

    render_list_page(&state, &session, &query).await
}

/// Apply a pending single favorite/unfavorite toggle, if the query string
/// carries one.
///
/// Absence of any of action/plugin/token is a silent no-op. An invalid
/// token rejects the request. An unknown action applies no change but
/// still persists, matching the load-apply-persist flow.
async fn apply_single_toggle(
    state: &AppState,
    session: &Session,
    query: &ListQuery,
) -> AppResult<Option<Response>> {
    let (Some(action), Some(plugin), Some(token)) = (&query.action, &query.plugin, &query.token)
    else {
        return Ok(None);
    };

    if let Err(rejection) = require_csrf(session, TOGGLE_PURPOSE, token).await {
        return Ok(Some(rejection));
    }

    let list = state.favorites().get_all().await;
    let list = match action.as_str() {
        "favorite" => list.add(plugin),
        "unfavorite" => list.remove(plugin),
        _ => list,
    };
    state.favorites().persist(&list).await?;

    Ok(None)
}

/// Apply a bulk favorite/unfavorite to the checked plugins.
///
/// POST /admin/plugins
async fn bulk_actions(
    State(state): State<AppState>,
    session: Session,
    RawForm(body): RawForm,
) -> AppResult<Response> {
    if let Err(redirect) = require_admin(&session).await {
        return Ok(redirect);
    }

    let fields: Vec<(String, String)> = form_urlencoded::parse(&body).into_owned().collect();

    let Some(action) = PluginListTable::current_action(&fields) else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };
    if action != "favorite" && action != "unfavorite" {
        return Ok(Redirect::to(LIST_PATH).into_response());
    }

    let checked: Vec<&str> = fields
        .iter()
        .filter(|(key, _)| key.as_str() == "checked[]")
        .map(|(_, value)| value.as_str())
        .collect();
    if checked.is_empty() {
        return Ok(Redirect::to(LIST_PATH).into_response());
    }

    let token = fields
        .iter()
        .find(|(key, _)| key.as_str() == "_token")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();
    if let Err(rejection) = require_csrf(&session, BULK_PURPOSE, token).await {
        return Ok(rejection);
    }

    let mut list = state.favorites().get_all().await;
    for plugin in &checked {
        list = match action.as_str() {
            "favorite" => list.add(plugin),
            _ => list.remove(plugin),
        };
    }
    // One write for the whole batch.
    state.favorites().persist(&list).await?;

    // The reported count is the number of submitted identifiers, duplicates
    // included, not the number of net changes.
    let param = if action == "favorite" {
        "favorited"
    } else {
        "unfavorited"
    };
    let sendback = format!("{LIST_PATH}?{param}={}", checked.len());

    Ok(Redirect::to(&sendback).into_response())
}

// =============================================================================
// Page composition
// =============================================================================

async fn render_list_page(
    state: &AppState,
    session: &Session,
    query: &ListQuery,
) -> AppResult<Response> {
    let inventory = plugin::discover(state.plugins_dir());
    let favorites = state.favorites().get_all().await;

    let toggle_token = generate_csrf_token(session, TOGGLE_PURPOSE)
        .await
        .unwrap_or_default();
    let bulk_token = generate_csrf_token(session, BULK_PURPOSE)
        .await
        .unwrap_or_default();

    let status = query.plugin_status.as_deref().unwrap_or("all");
    let page: u32 = query
        .paged
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1);

    // The favorites sub-table reuses the same widget and template as the
    // main table. The filter applies once per render pass, and each table
    // keeps the totals its own prepare call returned, so preparing the
    // favorites table never disturbs the main table's count summary.
    let mut pass = RenderPass::new();
    let favorite_records = pass.filter_to_favorites(inventory.clone(), &favorites);

    let mut favorites_table = PluginListTable::new("favorites", status, 1);
    favorites_table.prepare_items(&favorite_records, &favorites, &toggle_token);

    let mut plugins_table = PluginListTable::new("plugins", status, page);
    let totals = plugins_table.prepare_items(&inventory, &favorites, &toggle_token);

    let favorites_html = favorites_table.render(state.theme(), &bulk_token)?;
    let plugins_html = plugins_table.render(state.theme(), &bulk_token)?;

    let notices = notice::bulk_notices(query.favorited.as_deref(), query.unfavorited.as_deref());

    let mut context = tera::Context::new();
    context.insert("notices", &notices);
    context.insert("favorites_table", &favorites_html);
    context.insert("plugins_table", &plugins_html);
    context.insert("totals", &totals);
    context.insert("l10n", &serde_json::json!({
        "favorite": "Favorite",
        "unfavorite": "Unfavorite",
    }));
    context.insert("authenticated", &true);
    context.insert("path", LIST_PATH);

    Ok(render_admin_template(state, "admin/plugin-list.html", context).await)
}

// =============================================================================
// Router
// =============================================================================

pub fn router() -> Router<AppState> {
    Router::new().route(LIST_PATH, get(list_plugins).post(bulk_actions))
}
