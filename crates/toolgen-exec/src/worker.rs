use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use toolgen_core::pipeline::SubmitTicket;
use toolgen_core::RuntimeAction;
use toolgen_core::SubmissionError;

use crate::transport::GenerationTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEvent {
    pub run_id: u64,
    pub result: Result<String, SubmissionError>,
}

impl SubmissionEvent {
    pub fn into_action(self) -> RuntimeAction {
        RuntimeAction::SubmissionResolved {
            run_id: self.run_id,
            result: self.result,
        }
    }
}

/// Runs each ticket on its own thread and posts the outcome back to the UI
/// loop. Whether the receiver still cares is the pipeline's decision.
#[derive(Clone)]
pub struct SubmissionWorker {
    transport: Arc<dyn GenerationTransport>,
    tx: Sender<SubmissionEvent>,
}

impl SubmissionWorker {
    pub fn new(transport: Arc<dyn GenerationTransport>, tx: Sender<SubmissionEvent>) -> Self {
        Self { transport, tx }
    }

    pub fn dispatch(&self, ticket: SubmitTicket) -> std::io::Result<()> {
        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        let run_id = ticket.run_id;
        tracing::info!(run_id, transport = transport.name(), "dispatching submission");

        thread::Builder::new()
            .name(format!("toolgen-submit-{run_id}"))
            .spawn(move || {
                let started = Instant::now();
                let result = transport.generate(&ticket.spec);
                let elapsed_ms = started.elapsed().as_millis() as u64;
                match &result {
                    Ok(code) => {
                        tracing::info!(run_id, elapsed_ms, bytes = code.len(), "submission succeeded")
                    }
                    Err(err) => tracing::warn!(
                        run_id,
                        elapsed_ms,
                        kind = err.kind_label(),
                        error = %err,
                        "submission failed"
                    ),
                }
                if tx.send(SubmissionEvent { run_id, result }).is_err() {
                    tracing::debug!(run_id, "submission result dropped, receiver gone");
                }
            })?;
        Ok(())
    }
}
