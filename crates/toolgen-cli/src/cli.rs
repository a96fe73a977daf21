use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use toolgen_core::form::FormPreset;
use toolgen_core::form::PresetFlag;
use toolgen_core::form::PresetList;

#[derive(Debug, Parser)]
#[command(
    name = "toolgen",
    version,
    about = "Describe a tool, get generated source code back"
)]
pub struct Cli {
    /// Config file (default: <config dir>/toolgen/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the generation service
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs here instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Interactive terminal form (default)
    Form(FormArgs),
    /// Fill the form from flags, submit once, print or export the result
    Generate(GenerateArgs),
    /// List every field and the values it accepts
    Options,
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Default, Args)]
pub struct FormArgs {
    /// Prefill the form from a JSON, YAML or TOML file
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,
}

#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// Start from a JSON, YAML or TOML file; flags below override it
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,

    #[arg(long)]
    pub tool_name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub language: Option<String>,

    /// Repeatable, or comma-separated
    #[arg(long = "framework", value_delimiter = ',')]
    pub frameworks: Vec<String>,

    #[arg(long)]
    pub input_type: Option<String>,

    #[arg(long)]
    pub output_type: Option<String>,

    /// Repeatable, or comma-separated
    #[arg(long = "feature", value_delimiter = ',')]
    pub features: Vec<String>,

    #[arg(long, overrides_with = "no_include_comments")]
    pub include_comments: bool,

    /// Turn comments off even if the preset asks for them
    #[arg(long, overrides_with = "include_comments")]
    pub no_include_comments: bool,

    #[arg(long)]
    pub code_style: Option<String>,

    /// Export directory (default: config `export.directory`, else cwd)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Print the generated code instead of only exporting it
    #[arg(long)]
    pub stdout: bool,
}

impl GenerateArgs {
    /// The flag values as a preset, naming only what was actually passed.
    pub fn overrides(&self) -> FormPreset {
        let list = |items: &[String]| {
            (!items.is_empty()).then(|| PresetList::Items(items.to_vec()))
        };
        FormPreset {
            tool_name: self.tool_name.clone(),
            description: self.description.clone(),
            language: self.language.clone(),
            frameworks: list(&self.frameworks),
            input_type: self.input_type.clone(),
            output_type: self.output_type.clone(),
            additional_features: list(&self.features),
            include_comments: self.comments_override().map(PresetFlag::Bool),
            code_style: self.code_style.clone(),
        }
    }

    fn comments_override(&self) -> Option<bool> {
        match (self.include_comments, self.no_include_comments) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_flags_become_preset_entries() {
        let cli = Cli::parse_from([
            "toolgen",
            "-vv",
            "generate",
            "--tool-name",
            "Csv2Json",
            "--framework",
            "flask,fastapi",
            "--framework",
            "django",
            "--include-comments",
        ]);
        assert_eq!(cli.verbose, 2);
        let Some(Cmd::Generate(args)) = cli.cmd else {
            panic!("expected generate");
        };
        let preset = args.overrides();
        assert_eq!(preset.tool_name.as_deref(), Some("Csv2Json"));
        assert_eq!(
            preset.frameworks,
            Some(PresetList::Items(vec![
                "flask".to_string(),
                "fastapi".to_string(),
                "django".to_string(),
            ]))
        );
        assert_eq!(preset.include_comments, Some(PresetFlag::Bool(true)));
        assert_eq!(preset.additional_features, None);
        assert_eq!(preset.language, None);
    }

    #[test]
    fn comments_can_be_forced_off_or_left_to_the_preset() {
        let overrides = |flags: &[&str]| {
            let cli = Cli::parse_from(["toolgen", "generate"].iter().chain(flags));
            let Some(Cmd::Generate(args)) = cli.cmd else {
                panic!("expected generate");
            };
            args.overrides().include_comments
        };
        assert_eq!(overrides(&[]), None);
        assert_eq!(
            overrides(&["--no-include-comments"]),
            Some(PresetFlag::Bool(false))
        );
        assert_eq!(
            overrides(&["--no-include-comments", "--include-comments"]),
            Some(PresetFlag::Bool(true))
        );
    }

    #[test]
    fn no_subcommand_means_form() {
        let cli = Cli::parse_from(["toolgen", "--endpoint", "http://gen:5000"]);
        assert!(cli.cmd.is_none());
        assert_eq!(cli.endpoint.as_deref(), Some("http://gen:5000"));
    }
}
