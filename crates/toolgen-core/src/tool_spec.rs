use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStyle {
    #[default]
    Standard,
    Compact,
    Verbose,
}

impl CodeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Compact => "compact",
            Self::Verbose => "verbose",
        }
    }
}

impl fmt::Display for CodeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown code style '{0}' (expected standard, compact or verbose)")]
pub struct ParseCodeStyleError(pub String);

impl FromStr for CodeStyle {
    type Err = ParseCodeStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "compact" => Ok(Self::Compact),
            "verbose" => Ok(Self::Verbose),
            other => Err(ParseCodeStyleError(other.to_string())),
        }
    }
}

/// The validated request body sent to the generation service. Only
/// [`crate::form::FormController::validate_and_build`] produces one, so a
/// value of this type always satisfies the field schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub tool_name: String,
    pub description: String,
    pub language: String,
    pub frameworks: Vec<String>,
    pub input_type: String,
    pub output_type: String,
    pub additional_features: Vec<String>,
    pub include_comments: bool,
    pub code_style: CodeStyle,
}

/// Code returned by the service for one successful submission. `language`
/// is copied from the submitted spec for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub run_id: u64,
    pub code: String,
    pub language: String,
}
