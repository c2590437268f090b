#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module provides test infrastructure that uses the REAL kernel
//! code: the real routers, state, settings store, and templates, over
//! temporary directories. Only the directories differ from production.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;

use preferito_kernel::{AppState, Config, routes, session};
use preferito_test_utils::plugins_fixture;

/// Password every test app accepts.
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Test application wrapper using the real kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _plugins_dir: TempDir,
    _data_dir: TempDir,
}

impl TestApp {
    /// Create a test application whose plugins directory contains default
    /// fixtures for the given names.
    pub fn new(plugin_names: &[&str]) -> Self {
        let plugins_dir = plugins_fixture(plugin_names).expect("failed to write plugin fixtures");
        let data_dir = tempfile::tempdir().expect("failed to create data dir");

        // Templates and static assets live at the project root; tests run
        // from crates/kernel/.
        let project_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .and_then(|p| p.parent())
            .expect("kernel crate sits two levels below the project root");

        let config = Config {
            port: 0,
            settings_path: data_dir.path().join("settings.json"),
            plugins_dir: plugins_dir.path().to_path_buf(),
            templates_dir: project_root.join("templates"),
            static_dir: project_root.join("static"),
            admin_password: ADMIN_PASSWORD.to_string(),
            cookie_same_site: "strict".to_string(),
            cookie_secure: false,
        };

        let state = AppState::new(&config).expect("failed to initialize AppState");

        let session_layer = session::create_session_layer(SameSite::Strict, false);

        // Must match the router built in main.rs
        let router = Router::new()
            .merge(routes::front::router())
            .merge(routes::auth::router())
            .merge(routes::plugin_admin::router())
            .merge(routes::static_files::router())
            .layer(session_layer)
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        Self {
            router,
            state,
            _plugins_dir: plugins_dir,
            _data_dir: data_dir,
        }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("failed to send request")
    }

    /// GET `path`, optionally with a session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// POST a urlencoded form to `path`, optionally with a session cookie.
    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Log in as the admin and return the session cookie to carry on
    /// subsequent requests.
    pub async fn login(&self) -> String {
        let response = self.get("/login", None).await;
        let cookie = session_cookie(&response).expect("login page starts a session");

        let body = body_string(response).await;
        let token =
            extract_attr(&body, "name=\"_token\" value=\"").expect("login form carries a token");

        let form = format!("_token={token}&password={ADMIN_PASSWORD}");
        let response = self.post_form("/login", &form, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "login should succeed");

        cookie
    }
}

/// Read the session cookie from a response's `Set-Cookie` header.
pub fn session_cookie(response: &Response) -> Option<String> {
    let raw = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    Some(raw.split(';').next().unwrap_or(raw).to_string())
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Collect a response body into a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

/// Extract the value that follows `marker`, up to the next double quote.
pub fn extract_attr(body: &str, marker: &str) -> Option<String> {
    let start = body.find(marker)? + marker.len();
    let rest = &body[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

/// Extract the toggle token from the row link for `plugin`.
///
/// Row links render HTML-escaped, so the token is located after the
/// `plugin=` parameter rather than by matching the raw URL.
pub fn extract_toggle_token(body: &str, plugin: &str) -> Option<String> {
    let anchor = format!("plugin={plugin}");
    let start = body.find(&anchor)? + anchor.len();
    let rest = &body[start..];

    let token_start = rest.find("_token=")? + "_token=".len();
    let token: String = rest[token_start..]
        .chars()
        .take_while(char::is_ascii_hexdigit)
        .collect();

    (!token.is_empty()).then_some(token)
}
