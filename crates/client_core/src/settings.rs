use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "corerec.toml";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: String,
    pub database_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            database_url: storage::DEFAULT_DATABASE_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    database_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `corerec.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_url {
                    settings.api_url = v;
                }
                if let Some(v) = file_cfg.database_url {
                    settings.database_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
            }
            Err(err) => warn!("ignoring unreadable {}: {err}", file.display()),
        }
    }

    if let Some(v) = env("COREREC_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("COREREC_DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

impl ClientSettings {
    pub fn with_overrides(mut self, api_url: Option<String>, database_url: Option<String>) -> Self {
        if let Some(v) = api_url {
            self.api_url = v;
        }
        if let Some(v) = database_url {
            self.database_url = v;
        }
        self
    }

    /// Backend base url without a trailing slash.
    pub fn validated_api_url(&self) -> Result<String> {
        let parsed = Url::parse(self.api_url.trim())
            .with_context(|| format!("invalid backend url '{}'", self.api_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("backend url must use http or https: '{}'", self.api_url);
        }
        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }

    pub fn database_url(&self) -> String {
        storage::normalize_database_url(&self.database_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
