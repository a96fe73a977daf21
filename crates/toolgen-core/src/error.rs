use std::sync::Arc;

use thiserror::Error;

use crate::schema::FieldId;

/// A single field that failed schema validation. Shown inline next to the
/// field, never as a notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: FieldId,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is a multi-value field")]
    NotScalar(FieldId),
    #[error("{0} is not a multi-value field")]
    NotASet(FieldId),
}

/// Why a submission ended in the failed state. The variants only matter for
/// telemetry; every one of them produces the same user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Connection refused, DNS failure, timeout.
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with a non-2xx status.
    #[error("service error: status {status}")]
    Service { status: u16, body: String },
    /// 2xx, but the body was not JSON or had no string `code` field.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

pub const GENERIC_FAILURE_MESSAGE: &str = "Tool generation failed";

impl SubmissionError {
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Service { .. } => "service",
            Self::MalformedResponse(_) => "malformed-response",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::Transport(msg) => msg.clone(),
            Self::Service { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    format!("service returned status {status}")
                } else {
                    format!("service returned status {status} ({})", truncate(body, 120))
                }
            }
            Self::MalformedResponse(msg) => msg.clone(),
        }
    }

    pub fn user_message(&self) -> Arc<str> {
        format!("{GENERIC_FAILURE_MESSAGE}: {}", self.detail()).into()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no generated code to export")]
    NoArtifact,
    #[error("failed to export generated code: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_submission_error_shares_the_generic_prefix() {
        let errors = [
            SubmissionError::Transport("connection refused".to_string()),
            SubmissionError::Service {
                status: 500,
                body: String::new(),
            },
            SubmissionError::MalformedResponse("missing `code`".to_string()),
        ];
        for err in errors {
            assert!(err.user_message().starts_with(GENERIC_FAILURE_MESSAGE));
        }
    }

    #[test]
    fn service_detail_truncates_long_bodies() {
        let err = SubmissionError::Service {
            status: 502,
            body: "x".repeat(500),
        };
        let detail = err.detail();
        assert!(detail.starts_with("service returned status 502 ("));
        assert!(detail.chars().count() < 200);
    }

    #[test]
    fn validation_error_displays_its_message() {
        let err = ValidationError::new(FieldId::ToolName, "Tool name is required");
        assert_eq!(err.to_string(), "Tool name is required");
    }
}
