//! Runtime settings: optional `movie-search.toml` overlaid with environment variables

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "movie-search.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub access_token: String,
    pub language: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.themoviedb.org/3".into(),
            access_token: String::new(),
            language: "en-US".into(),
            request_timeout_secs: 10,
        }
    }
}

pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Read the config file (if present), then apply overrides from `env`
pub fn load_settings_from<F>(path: &Path, env: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str::<Settings>(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?
    } else {
        Settings::default()
    };

    if let Some(v) = env("TMDB_TOKEN") {
        settings.access_token = v;
    }
    if let Some(v) = env("APP__ACCESS_TOKEN") {
        settings.access_token = v;
    }

    if let Some(v) = env("TMDB_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__LANGUAGE") {
        settings.language = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => tracing::warn!(value = %v, "Ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    settings.validate()?;
    Ok(settings)
}

impl Settings {
    fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            bail!(
                "TMDB access token is missing; set TMDB_TOKEN or access_token in {}",
                CONFIG_FILE
            );
        }
        if self.api_base_url.trim().is_empty() {
            bail!("api_base_url must not be empty");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
