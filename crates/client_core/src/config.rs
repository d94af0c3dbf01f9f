use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://uncover-backend.onrender.com";
pub const DEFAULT_CONFIG_FILE: &str = "uncover.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    /// `None` waits for the backend indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the TOML file, then environment variables.
///
/// An explicit `config_path` must exist; the implicit `uncover.toml` in the
/// working directory is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if let Some(raw) = read_config_file(&path, required)? {
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());

    settings.base_url = normalize_base_url(&settings.base_url)?;
    Ok(settings)
}

/// A missing optional file is skipped; any other read failure is reported.
fn read_config_file(path: &Path, required: bool) -> anyhow::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if !required && err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            Ok(None)
        }
        Err(err) => {
            Err(err).with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }
}

fn apply_file(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.base_url {
        settings.base_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    Ok(())
}

fn apply_env(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("UNCOVER_API_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = non_empty("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = non_empty("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(err) => tracing::warn!(value = %v, "ignoring APP__REQUEST_TIMEOUT_SECS: {err}"),
        }
    }
}

/// Validates an http(s) base URL and strips trailing slashes so paths can be
/// appended with `format!("{base}/recommend")`.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("backend base url must not be empty");
    }

    let parsed = Url::parse(raw).with_context(|| format!("invalid backend base url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("backend base url must start with http:// or https://, got '{raw}'");
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
