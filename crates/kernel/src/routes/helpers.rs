//! Shared route helpers for page rendering.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::form::csrf::verify_csrf_token;
use crate::state::AppState;

/// Session key marking the authenticated admin.
pub const SESSION_IS_ADMIN: &str = "is_admin";

/// Require the authenticated admin, or redirect to the login page.
pub async fn require_admin(session: &Session) -> Result<(), Response> {
    let is_admin: Option<bool> = session.get(SESSION_IS_ADMIN).await.ok().flatten();

    if is_admin.unwrap_or(false) {
        Ok(())
    } else {
        Err(Redirect::to("/login").into_response())
    }
}

/// Require a valid CSRF token for `purpose`, or reject with 403.
///
/// A failed validation is fatal for the request; nothing is recovered.
pub async fn require_csrf(
    session: &Session,
    purpose: &str,
    submitted: &str,
) -> Result<(), Response> {
    match verify_csrf_token(session, purpose, submitted).await {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err((
            StatusCode::FORBIDDEN,
            Html("Invalid or expired security token."),
        )
            .into_response()),
    }
}

/// Render an admin template, falling back to a bare error page when the
/// template itself fails.
pub async fn render_admin_template(
    state: &AppState,
    template: &str,
    context: tera::Context,
) -> Response {
    match state.theme().tera().render(template, &context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, template = %template, "failed to render template");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!(
                    r#"<!DOCTYPE html>
<html><head><title>Error</title></head>
<body><h1>Template Error</h1><pre>{}</pre></body></html>"#,
                    html_escape(&e.to_string())
                )),
            )
                .into_response()
        }
    }
}

/// HTML-escape a string for safe output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
