use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::{Context, Result};
use toolgen_core::config::Config;

pub const ENDPOINT_ENV: &str = "TOOLGEN_ENDPOINT";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("toolgen").join("config.toml"))
}

/// File (explicit or default), then `TOOLGEN_ENDPOINT`, then `--endpoint`.
/// A missing default file means defaults; a missing explicit file is an
/// error.
pub fn load(explicit: Option<&Path>, endpoint_flag: Option<&str>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => read_config(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path)?,
            _ => {
                tracing::debug!("no config file found, using defaults");
                Config::default()
            }
        },
    };
    apply_overrides(
        &mut config,
        std::env::var(ENDPOINT_ENV).ok().as_deref(),
        endpoint_flag,
    );
    Ok(config)
}

pub fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn apply_overrides(config: &mut Config, env_endpoint: Option<&str>, flag_endpoint: Option<&str>) {
    for endpoint in [env_endpoint, flag_endpoint].into_iter().flatten() {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            config.endpoint.base_url = endpoint.to_string();
        }
    }
}

pub fn render(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render config as TOML")
}
