//! Admin login and logout.
//!
//! A single admin account authenticated by a configured password; success
//! sets a session flag that every admin route requires.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tower_sessions::Session;

use crate::form::csrf::{LOGIN_PURPOSE, generate_csrf_token};
use crate::state::AppState;

use super::helpers::{SESSION_IS_ADMIN, render_admin_template, require_csrf};

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(rename = "_token")]
    token: String,
    password: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", post(logout))
}

/// Show the login form.
///
/// GET /login
async fn login_page(State(state): State<AppState>, session: Session) -> Response {
    let is_admin: Option<bool> = session.get(SESSION_IS_ADMIN).await.ok().flatten();
    if is_admin.unwrap_or(false) {
        return Redirect::to("/admin/plugins").into_response();
    }

    render_login(&state, &session, None).await
}

/// Check the password and mark the session as admin.
///
/// POST /login
async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if let Err(resp) = require_csrf(&session, LOGIN_PURPOSE, &form.token).await {
        return resp;
    }

    let matches: bool = form
        .password
        .as_bytes()
        .ct_eq(state.admin_password().as_bytes())
        .into();

    if !matches {
        return render_login(&state, &session, Some("Incorrect password.")).await;
    }

    if let Err(e) = session.insert(SESSION_IS_ADMIN, true).await {
        tracing::error!(error = %e, "failed to store admin session flag");
        return render_login(&state, &session, Some("Login failed, try again.")).await;
    }

    Redirect::to("/admin/plugins").into_response()
}

/// End the admin session.
///
/// POST /logout
async fn logout(session: Session) -> Response {
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "failed to clear session");
    }
    Redirect::to("/login").into_response()
}

async fn render_login(state: &AppState, session: &Session, error: Option<&str>) -> Response {
    let csrf_token = generate_csrf_token(session, LOGIN_PURPOSE)
        .await
        .unwrap_or_default();

    let mut context = tera::Context::new();
    context.insert("csrf_token", &csrf_token);
    context.insert("error", &error);
    context.insert("authenticated", &false);

    render_admin_template(state, "admin/login.html", context).await
}
