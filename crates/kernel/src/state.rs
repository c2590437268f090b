//! Application state shared across all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::favorites::FavoritesService;
use crate::settings::{JsonFileSettings, SettingsStore};
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Persistent key-value settings.
    settings: Arc<dyn SettingsStore>,

    /// Favorites list service over the settings store.
    favorites: FavoritesService,

    /// Path to plugins directory on disk.
    plugins_dir: PathBuf,

    /// Path to static assets directory on disk.
    static_dir: PathBuf,

    /// Theme engine for template rendering.
    theme: Arc<ThemeEngine>,

    /// Password for the single admin account.
    admin_password: String,
}

impl AppState {
    /// Create new application state from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let settings: Arc<dyn SettingsStore> =
            Arc::new(JsonFileSettings::open(&config.settings_path)?);

        let favorites = FavoritesService::new(settings.clone());

        let theme = Arc::new(
            ThemeEngine::new(&config.templates_dir)
                .inspect_err(
                    |e| tracing::warn!(error = ?e, "failed to load templates, using empty engine"),
                )
                .unwrap_or_else(|_| ThemeEngine::empty()),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                settings,
                favorites,
                plugins_dir: config.plugins_dir.clone(),
                static_dir: config.static_dir.clone(),
                theme,
                admin_password: config.admin_password.clone(),
            }),
        })
    }

    /// Get the settings store.
    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.inner.settings
    }

    /// Get the favorites service.
    pub fn favorites(&self) -> &FavoritesService {
        &self.inner.favorites
    }

    /// Get the plugins directory path.
    pub fn plugins_dir(&self) -> &std::path::Path {
        &self.inner.plugins_dir
    }

    /// Get the static assets directory path.
    pub fn static_dir(&self) -> &std::path::Path {
        &self.inner.static_dir
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &Arc<ThemeEngine> {
        &self.inner.theme
    }

    /// Get the admin password.
    pub fn admin_password(&self) -> &str {
        &self.inner.admin_password
    }
}
