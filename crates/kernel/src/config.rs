//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Path to the JSON settings file (default: ./data/settings.json).
    pub settings_path: PathBuf,

    /// Path to plugins directory (default: ./plugins).
    pub plugins_dir: PathBuf,

    /// Path to templates directory (default: ./templates).
    pub templates_dir: PathBuf,

    /// Path to static assets directory (default: ./static).
    pub static_dir: PathBuf,

    /// Password for the single admin account.
    pub admin_password: String,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,

    /// Whether session cookies require HTTPS (default: false, the admin
    /// screen is typically served over plain HTTP on localhost).
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let settings_path = env::var("SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/settings.json"));

        let plugins_dir = env::var("PLUGINS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./plugins"));

        let templates_dir = env::var("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./static"));

        let admin_password =
            env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD environment variable is required")?;

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "strict".to_string())
            .to_lowercase();

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            port,
            settings_path,
            plugins_dir,
            templates_dir,
            static_dir,
            admin_password,
            cookie_same_site,
            cookie_secure,
        })
    }
}
