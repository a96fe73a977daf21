use super::*;
use pretty_assertions::assert_eq;

fn append(state: &mut GeneratorState, message: &str) {
    run_runtime(
        state,
        RuntimeAction::AppendLog(LogEntry::new(LogLevel::Info, message, 0)),
    );
}

#[test]
fn log_buffer_seq_is_monotonic() {
    let mut state = state();
    append(&mut state, "one");
    append(&mut state, "two");
    append(&mut state, "three");

    let seqs: Vec<u64> = state.logs.iter().map(|entry| entry.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
}

#[test]
fn log_buffer_capacity_eviction_is_fifo() {
    let mut state = state();
    state.logs = LogBuffer::new(3);

    for value in ["1", "2", "3", "4", "5"] {
        append(&mut state, value);
    }

    let seqs: Vec<u64> = state.logs.iter().map(|entry| entry.seq).collect();
    assert_eq!(seqs, vec![3, 4, 5]);
}

#[test]
fn clear_resets_sequence_to_one() {
    let mut state = state();
    append(&mut state, "1");
    append(&mut state, "2");
    state.logs.clear();
    append(&mut state, "3");

    let seqs: Vec<u64> = state.logs.iter().map(|entry| entry.seq).collect();
    assert_eq!(seqs, vec![1]);
}

#[test]
fn submission_lifecycle_is_logged_against_its_run() {
    let mut state = filled_state();
    let run_id = submit_ok(&mut state);
    run_runtime(
        &mut state,
        RuntimeAction::SubmissionResolved {
            run_id,
            result: Ok("print(1)".to_string()),
        },
    );

    let tagged: Vec<&str> = state
        .logs
        .iter()
        .filter(|entry| entry.run_id == run_id)
        .map(|entry| entry.message.as_str())
        .collect();
    assert_eq!(
        tagged,
        vec!["Submitting 'MyTool' (python)", "Generated 8 bytes of code"]
    );
}
