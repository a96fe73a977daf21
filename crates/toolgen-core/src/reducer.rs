use super::actions::GeneratorAction;
use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::pipeline::NotificationKind;
use super::pipeline::SubmitTicket;
use super::schema::FieldId;
use super::schema::FieldKind;
use super::state::FormCursor;
use super::state::GeneratorState;
use super::state::LogLevel;
use super::state::View;

/// Side effects the host must carry out. The reducer never performs I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorEffect {
    RequestFrame,
    SendGenerateRequest(SubmitTicket),
    TriggerFileDownload {
        filename: &'static str,
        content: String,
    },
    CopyToClipboard(String),
}

pub fn reduce(state: &mut GeneratorState, action: GeneratorAction) -> Vec<GeneratorEffect> {
    match action {
        GeneratorAction::User(user) => reduce_user(state, user),
        GeneratorAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

fn reduce_user(state: &mut GeneratorState, action: UserAction) -> Vec<GeneratorEffect> {
    match action {
        UserAction::SetField { field, value } => {
            if let Err(err) = state.form.set_field(field, value) {
                state.log(LogLevel::Warn, err.to_string(), 0);
                return Vec::new();
            }
            clear_violation(state, field);
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::SetFlag { field, value } => {
            if let Err(err) = state.form.set_flag(field, value) {
                state.log(LogLevel::Warn, err.to_string(), 0);
                return Vec::new();
            }
            clear_violation(state, field);
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::ToggleSetField { field, value } => {
            match state.form.toggle_set_field(field, &value) {
                Ok(true) => {
                    clear_violation(state, field);
                    vec![GeneratorEffect::RequestFrame]
                }
                Ok(false) => Vec::new(),
                Err(err) => {
                    state.log(LogLevel::Warn, err.to_string(), 0);
                    Vec::new()
                }
            }
        }
        UserAction::RemoveSetValue { field, value } => {
            match state.form.remove_set_value(field, &value) {
                Ok(true) => vec![GeneratorEffect::RequestFrame],
                Ok(false) => Vec::new(),
                Err(err) => {
                    state.log(LogLevel::Warn, err.to_string(), 0);
                    Vec::new()
                }
            }
        }
        UserAction::ApplyPreset(preset) => {
            state.form.apply_preset(&preset);
            state.violations.clear();
            state.log(LogLevel::Info, "Preset applied", 0);
            let field = state.cursor.field;
            focus(state, field);
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::ResetForm => {
            state.form.reset();
            state.violations.clear();
            state.cursor = FormCursor::default();
            state.view = View::Form;
            state.log(LogLevel::Info, "Form reset", 0);
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::Submit => submit(state),
        UserAction::Export => match state.pipeline.export_request() {
            Ok(file) => {
                let run_id = state
                    .pipeline
                    .artifact()
                    .map_or(0, |artifact| artifact.run_id);
                state.log(
                    LogLevel::Info,
                    format!("Exporting {} ({} bytes)", file.filename, file.content.len()),
                    run_id,
                );
                vec![GeneratorEffect::TriggerFileDownload {
                    filename: file.filename,
                    content: file.content,
                }]
            }
            Err(err) => {
                state.log(LogLevel::Warn, err.to_string(), 0);
                Vec::new()
            }
        },
        UserAction::CopyArtifact => match state.pipeline.artifact() {
            Some(artifact) => vec![GeneratorEffect::CopyToClipboard(artifact.code.clone())],
            None => Vec::new(),
        },
        UserAction::DismissNotification => {
            if state.notification.take().is_some() {
                vec![GeneratorEffect::RequestFrame]
            } else {
                Vec::new()
            }
        }
        UserAction::SelectView(view) => {
            state.view = view;
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::NextView => {
            state.view = state.view.next();
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::FocusNext => {
            let idx = (state.cursor.field.index() + 1) % FieldId::ALL.len();
            focus(state, FieldId::ALL[idx]);
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::FocusPrev => {
            let len = FieldId::ALL.len();
            let idx = (state.cursor.field.index() + len - 1) % len;
            focus(state, FieldId::ALL[idx]);
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::CursorNext => {
            let options = state.cursor.field.spec().options.len();
            if options == 0 {
                return Vec::new();
            }
            state.cursor.option = (state.cursor.option + 1) % options;
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::CursorPrev => {
            let options = state.cursor.field.spec().options.len();
            if options == 0 {
                return Vec::new();
            }
            state.cursor.option = if state.cursor.option == 0 {
                options - 1
            } else {
                state.cursor.option - 1
            };
            vec![GeneratorEffect::RequestFrame]
        }
        UserAction::ActivateCursor => activate_cursor(state),
        UserAction::InputChar(c) => {
            let field = state.cursor.field;
            if field.spec().kind != FieldKind::Text {
                return Vec::new();
            }
            let mut value = state.form.display_value(field);
            value.push(c);
            reduce_user(state, UserAction::SetField { field, value })
        }
        UserAction::InputBackspace => {
            let field = state.cursor.field;
            if field.spec().kind != FieldKind::Text {
                return Vec::new();
            }
            let mut value = state.form.display_value(field);
            if value.pop().is_none() {
                return Vec::new();
            }
            reduce_user(state, UserAction::SetField { field, value })
        }
        UserAction::CycleTheme => {
            state.theme = state.theme.next();
            vec![GeneratorEffect::RequestFrame]
        }
    }
}

fn submit(state: &mut GeneratorState) -> Vec<GeneratorEffect> {
    if state.pipeline.is_busy() {
        return Vec::new();
    }

    let spec = match state.form.validate_and_build() {
        Ok(spec) => spec,
        Err(violations) => {
            state.log(
                LogLevel::Warn,
                format!("{} field(s) need attention", violations.len()),
                0,
            );
            if let Some(first) = violations.first() {
                focus(state, first.field);
            }
            state.violations = violations;
            state.notification = None;
            state.view = View::Form;
            return vec![GeneratorEffect::RequestFrame];
        }
    };
    state.violations.clear();

    let Some(ticket) = state.pipeline.submit(spec) else {
        return Vec::new();
    };
    state.notification = None;
    state.log(
        LogLevel::Info,
        format!(
            "Submitting '{}' ({})",
            ticket.spec.tool_name, ticket.spec.language
        ),
        ticket.run_id,
    );
    vec![
        GeneratorEffect::RequestFrame,
        GeneratorEffect::SendGenerateRequest(ticket),
    ]
}

fn activate_cursor(state: &mut GeneratorState) -> Vec<GeneratorEffect> {
    let field = state.cursor.field;
    let spec = field.spec();
    let option = spec.options.get(state.cursor.option);
    match (spec.kind, option) {
        (FieldKind::Choice, Some(option)) => reduce_user(
            state,
            UserAction::SetField {
                field,
                value: option.value.to_string(),
            },
        ),
        (FieldKind::Set, Some(option)) => {
            let value = option.value.to_string();
            if state.form.contains(field, &value) {
                reduce_user(state, UserAction::RemoveSetValue { field, value })
            } else {
                reduce_user(state, UserAction::ToggleSetField { field, value })
            }
        }
        (FieldKind::Flag, _) => {
            let current = state
                .form
                .value(field)
                .and_then(crate::schema::parse_flag)
                .unwrap_or(false);
            reduce_user(
                state,
                UserAction::SetFlag {
                    field,
                    value: !current,
                },
            )
        }
        _ => Vec::new(),
    }
}

fn reduce_runtime(state: &mut GeneratorState, action: RuntimeAction) -> Vec<GeneratorEffect> {
    match action {
        RuntimeAction::SubmissionResolved { run_id, result } => {
            let failure = result.as_ref().err().map(|err| err.kind_label());
            let Some(notification) = state.pipeline.resolve(run_id, result) else {
                return Vec::new();
            };
            match notification.kind {
                NotificationKind::Success => {
                    let bytes = state
                        .pipeline
                        .artifact()
                        .map_or(0, |artifact| artifact.code.len());
                    state.log(
                        LogLevel::Info,
                        format!("Generated {bytes} bytes of code"),
                        run_id,
                    );
                    state.view = View::Result;
                }
                NotificationKind::Failure => {
                    state.log(
                        LogLevel::Error,
                        format!(
                            "{} [{}]",
                            notification.message,
                            failure.unwrap_or("unknown")
                        ),
                        run_id,
                    );
                }
            }
            state.notification = Some(notification);
            vec![GeneratorEffect::RequestFrame]
        }
        RuntimeAction::Teardown => {
            state.pipeline.teardown();
            Vec::new()
        }
        RuntimeAction::AppendLog(entry) => {
            state.logs.append(entry);
            vec![GeneratorEffect::RequestFrame]
        }
    }
}

fn clear_violation(state: &mut GeneratorState, field: FieldId) {
    state.violations.retain(|err| err.field != field);
}

/// Moves focus and parks the option cursor on the field's current choice.
fn focus(state: &mut GeneratorState, field: FieldId) {
    let spec = field.spec();
    let option = match spec.kind {
        FieldKind::Choice => state.form.value(field).and_then(|value| {
            let value = value.trim().to_ascii_lowercase();
            spec.options.iter().position(|option| option.value == value)
        }),
        _ => None,
    };
    state.cursor = FormCursor {
        field,
        option: option.unwrap_or(0),
    };
}

#[cfg(test)]
mod tests;
