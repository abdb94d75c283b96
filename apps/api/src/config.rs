use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::theme::Theme;

/// Application configuration loaded from environment variables.
/// Every setting has a default, so the service starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Theme for a fresh draft.
    pub default_theme: Theme,
    /// JSON file the editor draft is cached in. Unset keeps the draft in memory only.
    pub draft_cache_path: Option<PathBuf>,
    /// Directory for server-side saved packages. Unset disables `/draft/export/save`.
    pub export_dir: Option<PathBuf>,
    pub notice_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            default_theme: Theme::default(),
            draft_cache_path: None,
            export_dir: None,
            notice_capacity: 50,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            port: match get("PORT") {
                Some(raw) => raw
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            default_theme: match get("DEFAULT_THEME") {
                Some(raw) => raw
                    .parse::<Theme>()
                    .with_context(|| format!("DEFAULT_THEME '{raw}' is not a known theme"))?,
                None => defaults.default_theme,
            },
            draft_cache_path: optional_path(get("DRAFT_CACHE_PATH")),
            export_dir: optional_path(get("EXPORT_DIR")),
            notice_capacity: match get("NOTICE_CAPACITY") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("NOTICE_CAPACITY must be a positive integer")?
                    .max(1),
                None => defaults.notice_capacity,
            },
        })
    }
}

/// Empty values count as unset.
fn optional_path(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
