use super::*;
use pretty_assertions::assert_eq;

#[test]
fn valid_submit_sends_one_request_with_the_built_spec() {
    let mut state = filled_state();
    let effects = run_user(&mut state, UserAction::Submit);

    let tickets: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            GeneratorEffect::SendGenerateRequest(ticket) => Some(ticket),
            _ => None,
        })
        .collect();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].spec.language, "python");
    assert_eq!(tickets[0].spec.frameworks, vec!["flask".to_string()]);
    assert_eq!(
        state.pipeline.status(),
        SubmissionStatus::Submitting {
            run_id: tickets[0].run_id
        }
    );
    assert!(state.violations.is_empty());
}

#[test]
fn submit_while_submitting_emits_nothing() {
    let mut state = filled_state();
    let run_id = submit_ok(&mut state);

    let effects = run_user(&mut state, UserAction::Submit);
    assert!(effects.is_empty());
    assert_eq!(state.pipeline.active_run_id(), Some(run_id));
}

#[test]
fn blank_required_fields_block_the_request() {
    let mut state = state();
    state.view = View::Activity;

    let effects = run_user(&mut state, UserAction::Submit);
    assert_eq!(effects, vec![GeneratorEffect::RequestFrame]);
    assert_eq!(state.pipeline.status(), SubmissionStatus::Idle);
    assert_eq!(state.view, View::Form);

    let fields: Vec<FieldId> = state.violations.iter().map(|err| err.field).collect();
    assert_eq!(
        fields,
        vec![
            FieldId::ToolName,
            FieldId::Description,
            FieldId::Language,
            FieldId::Frameworks,
            FieldId::InputType,
            FieldId::OutputType,
        ]
    );
    assert_eq!(state.cursor.field, FieldId::ToolName);
    assert_eq!(
        state
            .violation_for(FieldId::Frameworks)
            .map(|err| err.message.as_str()),
        Some("Select at least one framework")
    );
}

#[test]
fn unsupported_choice_is_reported_against_its_field() {
    let mut state = filled_state();
    run_user(
        &mut state,
        UserAction::SetField {
            field: FieldId::Language,
            value: "cobol".to_string(),
        },
    );

    let effects = run_user(&mut state, UserAction::Submit);
    assert_eq!(sent_requests(&effects), 0);
    assert_eq!(state.violations.len(), 1);
    assert_eq!(state.violations[0].field, FieldId::Language);
    assert_eq!(state.violations[0].message, "Unsupported language 'cobol'");
    assert_eq!(state.cursor.field, FieldId::Language);
}

#[test]
fn editing_a_field_clears_only_its_violation() {
    let mut state = state();
    run_user(&mut state, UserAction::Submit);
    let before = state.violations.len();

    run_user(
        &mut state,
        UserAction::SetField {
            field: FieldId::ToolName,
            value: "X".to_string(),
        },
    );
    assert!(state.violation_for(FieldId::ToolName).is_none());
    assert_eq!(state.violations.len(), before - 1);
}

#[test]
fn building_does_not_mutate_the_form() {
    let state = filled_state();
    let first = state.form.validate_and_build().expect("valid");
    let second = state.form.validate_and_build().expect("valid");
    assert_eq!(first, second);
}

#[test]
fn resubmit_after_failure_uses_a_fresh_run_id() {
    let mut state = filled_state();
    let first = submit_ok(&mut state);
    run_runtime(
        &mut state,
        RuntimeAction::SubmissionResolved {
            run_id: first,
            result: Err(SubmissionError::Transport("refused".to_string())),
        },
    );

    let second = submit_ok(&mut state);
    assert!(second > first);
    assert!(state.notification.is_none());
}

#[test]
fn submit_after_teardown_sends_nothing() {
    let mut state = filled_state();
    run_runtime(&mut state, RuntimeAction::Teardown);

    let effects = run_user(&mut state, UserAction::Submit);
    assert_eq!(sent_requests(&effects), 0);
    assert_eq!(state.pipeline.status(), SubmissionStatus::Idle);
}

#[test]
fn invalid_resubmit_replaces_the_failure_banner_with_violations() {
    let mut state = filled_state();
    let run_id = submit_ok(&mut state);
    run_runtime(
        &mut state,
        RuntimeAction::SubmissionResolved {
            run_id,
            result: Err(SubmissionError::Transport("refused".to_string())),
        },
    );
    assert!(state.notification.is_some());

    run_user(
        &mut state,
        UserAction::SetField {
            field: FieldId::ToolName,
            value: String::new(),
        },
    );
    let effects = run_user(&mut state, UserAction::Submit);

    assert_eq!(sent_requests(&effects), 0);
    assert!(state.notification.is_none());
    assert_eq!(state.violations.len(), 1);
    assert_eq!(state.violations[0].field, FieldId::ToolName);
    assert_eq!(
        state.pipeline.status(),
        SubmissionStatus::Failed { run_id }
    );
}
