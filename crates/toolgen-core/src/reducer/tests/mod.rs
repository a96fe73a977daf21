pub(super) use super::reduce;
pub(super) use crate::actions::GeneratorAction;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::error::SubmissionError;
pub(super) use crate::pipeline::NotificationKind;
pub(super) use crate::pipeline::SubmissionStatus;
pub(super) use crate::reducer::GeneratorEffect;
pub(super) use crate::schema::FieldId;
pub(super) use crate::state::GeneratorState;
pub(super) use crate::state::LogBuffer;
pub(super) use crate::state::LogEntry;
pub(super) use crate::state::LogLevel;
pub(super) use crate::state::View;

mod log_buffer;
mod submission;

fn state() -> GeneratorState {
    GeneratorState::default()
}

/// A form that passes validation as-is.
fn filled_state() -> GeneratorState {
    let mut state = state();
    for (field, value) in [
        (FieldId::ToolName, "MyTool"),
        (FieldId::Description, "desc"),
        (FieldId::Language, "python"),
        (FieldId::InputType, "text"),
        (FieldId::OutputType, "json"),
    ] {
        run_user(
            &mut state,
            UserAction::SetField {
                field,
                value: value.to_string(),
            },
        );
    }
    run_user(
        &mut state,
        UserAction::ToggleSetField {
            field: FieldId::Frameworks,
            value: "flask".to_string(),
        },
    );
    state
}

fn run_user(state: &mut GeneratorState, action: UserAction) -> Vec<GeneratorEffect> {
    reduce(state, GeneratorAction::User(action))
}

fn run_runtime(state: &mut GeneratorState, action: RuntimeAction) -> Vec<GeneratorEffect> {
    reduce(state, GeneratorAction::Runtime(action))
}

/// Submits and returns the run id of the dispatched request.
fn submit_ok(state: &mut GeneratorState) -> u64 {
    let effects = run_user(state, UserAction::Submit);
    let run_ids: Vec<u64> = effects
        .iter()
        .filter_map(|effect| match effect {
            GeneratorEffect::SendGenerateRequest(ticket) => Some(ticket.run_id),
            _ => None,
        })
        .collect();
    assert_eq!(run_ids.len(), 1, "expected exactly one request: {effects:?}");
    run_ids[0]
}

fn sent_requests(effects: &[GeneratorEffect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, GeneratorEffect::SendGenerateRequest(_)))
        .count()
}
