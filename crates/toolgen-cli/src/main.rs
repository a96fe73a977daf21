mod cli;
mod config;
mod generate;
mod logging;
mod preset;
mod ui;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use toolgen_core::config::Config;
use toolgen_core::reducer::reduce;
use toolgen_core::schema::{fields, FieldKind};
use toolgen_core::{GeneratorAction, GeneratorState, UserAction};
use toolgen_exec::{GenerationTransport, HttpTransport};

use crate::cli::{Cli, Cmd, FormArgs};
use crate::logging::LogSink;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap_or(Cmd::Form(FormArgs::default()));

    let sink = match (&cmd, cli.log_file) {
        (_, Some(path)) => LogSink::File(path),
        (Cmd::Form(_), None) => LogSink::File(
            logging::default_log_file()
                .unwrap_or_else(|| std::env::temp_dir().join("toolgen.log")),
        ),
        _ => LogSink::Stderr,
    };
    logging::init(cli.verbose, sink)?;

    let config = config::load(cli.config.as_deref(), cli.endpoint.as_deref())?;
    tracing::debug!(endpoint = %config.endpoint.generate_url(), "configuration resolved");

    match cmd {
        Cmd::Form(args) => {
            run_form(config, &args)?;
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Generate(args) => {
            let transport = http_transport(&config)?;
            generate::run(GeneratorState::new(config), transport, &args)
        }
        Cmd::Options => {
            print_options();
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Config => {
            print!("{}", config::render(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn http_transport(config: &Config) -> Result<Arc<dyn GenerationTransport>> {
    let transport =
        HttpTransport::new(&config.endpoint).context("Failed to set up the generation client")?;
    Ok(Arc::new(transport))
}

fn run_form(config: Config, args: &FormArgs) -> Result<()> {
    let transport = http_transport(&config)?;
    let export_dir = config.export.directory.clone().unwrap_or_default();
    let mut state = GeneratorState::new(config);
    if let Some(path) = &args.preset {
        let preset = preset::load_preset(path)?;
        reduce(&mut state, GeneratorAction::User(UserAction::ApplyPreset(preset)));
    }

    tracing::info!(
        endpoint = %state.config.endpoint.generate_url(),
        export_dir = %export_dir.display(),
        "starting terminal form"
    );
    ui::run(state, transport, export_dir).context("Terminal form failed")
}

fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Choice => "one of",
        FieldKind::Set => "any of",
        FieldKind::Flag => "flag",
    }
}

fn print_options() {
    for spec in fields() {
        let required = if spec.required { ", required" } else { "" };
        println!("{} ({}{})", spec.id.key(), kind_label(spec.kind), required);
        println!("  {}: {}", spec.label, spec.help);
        if !spec.default.is_empty() {
            println!("  default: {}", spec.default);
        }
        for option in spec.options {
            println!("    {:<16} {}", option.value, option.label);
        }
    }
}
