//! Front route: the plugin list is the whole site.

use axum::Router;
use axum::response::Redirect;
use axum::routing::get;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(front_page))
}

async fn front_page() -> Redirect {
    Redirect::to("/admin/plugins")
}
