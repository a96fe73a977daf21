use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::sync::Arc;

use anyhow::{Context, Result};
use toolgen_core::pipeline::FileDownload;
use toolgen_core::pipeline::SubmissionStatus;
use toolgen_core::reducer::reduce;
use toolgen_core::GeneratorAction;
use toolgen_core::GeneratorEffect;
use toolgen_core::GeneratorState;
use toolgen_core::UserAction;
use toolgen_exec::DirectoryDownload;
use toolgen_exec::GenerationTransport;
use toolgen_exec::SubmissionWorker;

use crate::cli::GenerateArgs;
use crate::preset::load_preset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Generated {
        code: String,
        exported: Option<PathBuf>,
    },
    Invalid(Vec<String>),
    Failed(String),
}

impl GenerateOutcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Generated { .. } => ExitCode::SUCCESS,
            Self::Invalid(_) => ExitCode::from(2),
            Self::Failed(_) => ExitCode::from(1),
        }
    }
}

pub fn run(
    mut state: GeneratorState,
    transport: Arc<dyn GenerationTransport>,
    args: &GenerateArgs,
) -> Result<ExitCode> {
    let outcome = generate(&mut state, transport, args)?;
    match &outcome {
        GenerateOutcome::Generated { code, exported } => {
            if args.stdout {
                let mut out = std::io::stdout().lock();
                out.write_all(code.as_bytes())
                    .and_then(|()| out.flush())
                    .context("Failed to write generated code to stdout")?;
            }
            if let Some(path) = exported {
                eprintln!("Saved generated code to {}", path.display());
            }
        }
        GenerateOutcome::Invalid(lines) => {
            eprintln!("The form has problems:");
            for line in lines {
                eprintln!("  {line}");
            }
        }
        GenerateOutcome::Failed(message) => eprintln!("{message}"),
    }
    Ok(outcome.exit_code())
}

/// Fills the form, submits once and waits for the single result.
pub fn generate(
    state: &mut GeneratorState,
    transport: Arc<dyn GenerationTransport>,
    args: &GenerateArgs,
) -> Result<GenerateOutcome> {
    if let Some(path) = &args.preset {
        let preset = load_preset(path)?;
        dispatch(state, UserAction::ApplyPreset(preset));
    }
    dispatch(state, UserAction::ApplyPreset(args.overrides()));

    let effects = dispatch(state, UserAction::Submit);
    if !state.violations.is_empty() {
        let lines = state
            .violations
            .iter()
            .map(|err| format!("{}: {}", err.field.spec().label, err.message))
            .collect();
        return Ok(GenerateOutcome::Invalid(lines));
    }

    let (tx, rx) = mpsc::channel();
    let worker = SubmissionWorker::new(transport, tx);
    let mut dispatched = false;
    for effect in effects {
        if let GeneratorEffect::SendGenerateRequest(ticket) = effect {
            worker
                .dispatch(ticket)
                .context("Failed to start submission worker")?;
            dispatched = true;
        }
    }
    if !dispatched {
        anyhow::bail!("Submission was not started");
    }
    drop(worker);

    let event = rx
        .recv()
        .context("Submission worker stopped without a result")?;
    reduce(state, GeneratorAction::Runtime(event.into_action()));

    match state.pipeline.status() {
        SubmissionStatus::Success { .. } => {
            let code = state
                .pipeline
                .artifact()
                .map(|artifact| artifact.code.clone())
                .unwrap_or_default();
            let exported = if args.stdout && args.out_dir.is_none() {
                None
            } else {
                Some(export(state, args)?)
            };
            Ok(GenerateOutcome::Generated { code, exported })
        }
        _ => Ok(GenerateOutcome::Failed(
            state
                .pipeline
                .error()
                .unwrap_or(toolgen_core::GENERIC_FAILURE_MESSAGE)
                .to_string(),
        )),
    }
}

fn export(state: &mut GeneratorState, args: &GenerateArgs) -> Result<PathBuf> {
    let dir = args
        .out_dir
        .clone()
        .or_else(|| state.config.export.directory.clone())
        .unwrap_or_default();
    let download = DirectoryDownload::new(dir);

    let mut saved = None;
    for effect in dispatch(state, UserAction::Export) {
        if let GeneratorEffect::TriggerFileDownload { filename, content } = effect {
            download
                .trigger_file_download(filename, &content)
                .with_context(|| {
                    format!("Failed to write {}", download.target(filename).display())
                })?;
            saved = Some(download.target(filename));
        }
    }
    saved.context("No generated code to export")
}

fn dispatch(state: &mut GeneratorState, action: UserAction) -> Vec<GeneratorEffect> {
    reduce(state, GeneratorAction::User(action))
}
