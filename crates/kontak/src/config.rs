//! Server configuration.
//!
//! Loaded from `kontak.toml` in the working directory when present,
//! then overridden field-by-field from the environment:
//!
//! - `KONTAK_BIND` - listen address
//! - `KONTAK_DATABASE_URL` - `SQLx` connection string
//! - `KONTAK_SESSION_TTL_SECS` - session inactivity window
//! - `KONTAK_STRICT_NOT_FOUND` - 404 on missing contacts instead of
//!   rendering with an absent record
//!
//! Every field has a default, so a bare `kontak` with no file and no
//! environment runs on port 3000 against `kontak.db`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

const CONFIG_FILE: &str = "kontak.toml";

/// Typed server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Listen address for the HTTP server
    pub bind: String,
    /// Connection string for the contact database
    pub database_url: String,
    /// Session inactivity window, seconds
    pub session_ttl_secs: u64,
    /// Answer 404 for missing contacts instead of rendering an empty
    /// record (the original behavior keeps this off)
    pub strict_not_found: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            database_url: "sqlite://kontak.db?mode=rwc".to_string(),
            session_ttl_secs: 300,
            strict_not_found: false,
        }
    }
}

impl Config {
    /// Load configuration: defaults, then `kontak.toml`, then environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse the file at `path`, falling back to defaults when absent.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// The session TTL as a [`Duration`].
    #[must_use]
    pub const fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Override fields from an environment lookup (injected for tests).
    fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = get("KONTAK_BIND") {
            self.bind = bind;
        }
        if let Some(url) = get("KONTAK_DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(ttl) = get("KONTAK_SESSION_TTL_SECS") {
            if let Ok(secs) = ttl.parse() {
                self.session_ttl_secs = secs;
            }
        }
        if let Some(strict) = get("KONTAK_STRICT_NOT_FOUND") {
            self.strict_not_found = matches!(
                strict.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
}
