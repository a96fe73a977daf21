use std::sync::Arc;

use crate::error::ExportError;
use crate::error::SubmissionError;
use crate::tool_spec::GeneratedArtifact;
use crate::tool_spec::ToolSpec;

pub const EXPORT_FILENAME: &str = "generated_tool.txt";

/// Host-provided "save as". The pipeline hands over the file name and the
/// exact content; where the bytes end up is the host's business.
pub trait FileDownload {
    fn trigger_file_download(&self, filename: &str, content: &str) -> std::io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting { run_id: u64 },
    Success { run_id: u64 },
    Failed { run_id: u64 },
}

impl SubmissionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Submitting { .. } => "Submitting",
            Self::Success { .. } => "Success",
            Self::Failed { .. } => "Failed",
        }
    }

    pub fn is_busy(self) -> bool {
        matches!(self, Self::Submitting { .. })
    }
}

/// What the host must send. Issued at most once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub run_id: u64,
    pub spec: ToolSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: Arc<str>,
    pub run_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub content: String,
}

/// `Idle → Submitting → {Success, Failed}`, and back to `Submitting` on the
/// next accepted submit. Only one run is ever outstanding.
#[derive(Debug, Clone)]
pub struct SubmissionPipeline {
    status: SubmissionStatus,
    last_run_id: u64,
    in_flight: Option<ToolSpec>,
    artifact: Option<GeneratedArtifact>,
    error: Option<Arc<str>>,
    live: bool,
}

impl Default for SubmissionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionPipeline {
    pub fn new() -> Self {
        Self {
            status: SubmissionStatus::Idle,
            last_run_id: 0,
            in_flight: None,
            artifact: None,
            error: None,
            live: true,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub fn active_run_id(&self) -> Option<u64> {
        match self.status {
            SubmissionStatus::Submitting { run_id } => Some(run_id),
            _ => None,
        }
    }

    pub fn artifact(&self) -> Option<&GeneratedArtifact> {
        self.artifact.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_export(&self) -> bool {
        self.artifact.is_some()
    }

    /// Starts a new run. Returns `None` while a run is outstanding or after
    /// teardown; nothing must be sent in that case.
    pub fn submit(&mut self, spec: ToolSpec) -> Option<SubmitTicket> {
        if !self.live || self.is_busy() {
            return None;
        }
        self.last_run_id = self.last_run_id.saturating_add(1);
        let run_id = self.last_run_id;
        self.status = SubmissionStatus::Submitting { run_id };
        self.in_flight = Some(spec.clone());
        Some(SubmitTicket { run_id, spec })
    }

    /// Completes the outstanding run. Results for any other run, or arriving
    /// after teardown, are dropped and yield `None`.
    pub fn resolve(
        &mut self,
        run_id: u64,
        result: Result<String, SubmissionError>,
    ) -> Option<Notification> {
        if !self.live || self.active_run_id() != Some(run_id) {
            return None;
        }
        let spec = self.in_flight.take();
        match result {
            Ok(code) => {
                self.artifact = Some(GeneratedArtifact {
                    run_id,
                    code,
                    language: spec.map(|spec| spec.language).unwrap_or_default(),
                });
                self.error = None;
                self.status = SubmissionStatus::Success { run_id };
                Some(Notification {
                    kind: NotificationKind::Success,
                    message: "Tool generated successfully".into(),
                    run_id,
                })
            }
            Err(err) => {
                let message = err.user_message();
                self.error = Some(Arc::clone(&message));
                self.status = SubmissionStatus::Failed { run_id };
                Some(Notification {
                    kind: NotificationKind::Failure,
                    message,
                    run_id,
                })
            }
        }
    }

    pub fn export_request(&self) -> Result<ExportFile, ExportError> {
        let artifact = self.artifact.as_ref().ok_or(ExportError::NoArtifact)?;
        Ok(ExportFile {
            filename: EXPORT_FILENAME,
            content: artifact.code.clone(),
        })
    }

    pub fn export_artifact(&self, download: &dyn FileDownload) -> Result<(), ExportError> {
        let artifact = self.artifact.as_ref().ok_or(ExportError::NoArtifact)?;
        download.trigger_file_download(EXPORT_FILENAME, &artifact.code)?;
        Ok(())
    }

    pub fn teardown(&mut self) {
        self.live = false;
        self.in_flight = None;
    }
}
