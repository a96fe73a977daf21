use crate::error::SubmissionError;
use crate::form::FormPreset;
use crate::schema::FieldId;
use crate::state::LogEntry;
use crate::state::View;

#[derive(Debug, Clone)]
pub enum GeneratorAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone)]
pub enum UserAction {
    SetField { field: FieldId, value: String },
    SetFlag { field: FieldId, value: bool },
    ToggleSetField { field: FieldId, value: String },
    RemoveSetValue { field: FieldId, value: String },
    ApplyPreset(FormPreset),
    ResetForm,
    Submit,
    Export,
    CopyArtifact,
    DismissNotification,
    SelectView(View),
    NextView,
    FocusNext,
    FocusPrev,
    CursorNext,
    CursorPrev,
    /// Select the option under the cursor (choice), toggle it (set), or flip
    /// the flag.
    ActivateCursor,
    InputChar(char),
    InputBackspace,
    CycleTheme,
}

#[derive(Debug, Clone)]
pub enum RuntimeAction {
    SubmissionResolved {
        run_id: u64,
        result: Result<String, SubmissionError>,
    },
    /// The host is going away; later results must not touch state.
    Teardown,
    AppendLog(LogEntry),
}
