use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ValidationError;
use crate::form::FormController;
use crate::pipeline::Notification;
use crate::pipeline::SubmissionPipeline;
use crate::schema::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiTheme {
    Classic,
    NeonNoir,
    ForestZen,
}

impl UiTheme {
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::NeonNoir => "neon-noir",
            Self::ForestZen => "forest-zen",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Classic => Self::NeonNoir,
            Self::NeonNoir => Self::ForestZen,
            Self::ForestZen => Self::Classic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Result,
    Activity,
}

impl View {
    pub const ALL: [View; 3] = [Self::Form, Self::Result, Self::Activity];

    pub fn next(self) -> Self {
        match self {
            Self::Form => Self::Result,
            Self::Result => Self::Activity,
            Self::Activity => Self::Form,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Form => "Form",
            Self::Result => "Result",
            Self::Activity => "Activity",
        }
    }
}

/// Which field has focus, and which of its options the cursor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCursor {
    pub field: FieldId,
    pub option: usize,
}

impl Default for FormCursor {
    fn default() -> Self {
        Self {
            field: FieldId::ToolName,
            option: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub seq: u64,
    pub level: LogLevel,
    pub ts_ms: Option<i64>,
    pub message: String,
    pub run_id: u64,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>, run_id: u64) -> Self {
        Self {
            seq: 0,
            level,
            ts_ms: Some(chrono::Utc::now().timestamp_millis()),
            message: message.into(),
            run_id,
        }
    }
}

/// Bounded FIFO of activity entries. `seq` is assigned on append and restarts
/// at 1 after a clear.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    cap: usize,
    next_seq: u64,
    buf: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            next_seq: 1,
            buf: VecDeque::with_capacity(cap.max(1)),
        }
    }

    pub fn append(&mut self, mut entry: LogEntry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;

        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.next_seq = 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorState {
    pub form: FormController,
    /// Violations from the most recent submit attempt, shown inline.
    pub violations: Vec<ValidationError>,
    pub pipeline: SubmissionPipeline,
    pub notification: Option<Notification>,
    pub view: View,
    pub cursor: FormCursor,
    pub theme: UiTheme,
    pub logs: LogBuffer,
    pub config: Config,
}

impl GeneratorState {
    pub fn new(config: Config) -> Self {
        Self {
            form: FormController::new(),
            violations: Vec::new(),
            pipeline: SubmissionPipeline::new(),
            notification: None,
            view: View::Form,
            cursor: FormCursor::default(),
            theme: config.ui.theme,
            logs: LogBuffer::new(500),
            config,
        }
    }

    pub fn violation_for(&self, field: FieldId) -> Option<&ValidationError> {
        self.violations.iter().find(|err| err.field == field)
    }

    pub fn log(&mut self, level: LogLevel, message: impl Into<String>, run_id: u64) {
        self.logs.append(LogEntry::new(level, message, run_id));
    }
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
