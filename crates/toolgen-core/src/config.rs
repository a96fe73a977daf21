use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::state::UiTheme;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const GENERATE_PATH: &str = "/generate_tool";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub export: ExportConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl EndpointConfig {
    pub fn generate_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_PATH)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Where exported files land. `None` means the current directory.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: UiTheme,
    pub highlight: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Classic,
            highlight: true,
        }
    }
}
