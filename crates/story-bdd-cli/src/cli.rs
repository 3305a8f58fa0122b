//! Command definitions and dispatch for the `story-bdd` binary.

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use story_bdd::{Outcome, Pipeline, StepSynthesizer, Synthesis, read_feature, validate};
use story_bdd_patterns::{KeywordTable, Language};

use crate::config::{CliConfig, ConfigOverrides, LogLevel, parse_file_name_words};
use crate::output::{
    CheckReport, OutputDir, Summary, feature_path, steps_path, write_check_json,
    write_check_text, write_created, write_document, write_no_steps, write_skipped,
    write_summary,
};

/// Turn annotated user stories into Gherkin features and step stubs.
#[derive(Parser, Debug)]
#[command(name = "story-bdd", author, version, about)]
pub struct Cli {
    /// Settings shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that override the `STORY_BDD_*` environment variables.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
    /// Language of stories without a `# language:` directive (pt, en).
    #[arg(long, global = true)]
    pub lang: Option<Language>,
    /// Words of the "I want" line kept in generated file names.
    #[arg(long, global = true, value_parser = parse_file_name_words)]
    pub file_name_words: Option<usize>,
    /// Directory receiving generated features and step files.
    #[arg(long, global = true)]
    pub output: Option<Utf8PathBuf>,
}

impl GlobalArgs {
    /// Overrides to layer over the environment configuration.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            log_level: self.log_level,
            default_language: self.lang,
            file_name_words: self.file_name_words,
            output_dir: self.output.clone(),
        }
    }
}

/// Supported commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate feature documents and step stubs from story files.
    Generate(GenerateArgs),
    /// Validate story files without generating anything.
    Check(CheckArgs),
    /// Print step stubs for an existing feature document.
    Steps(StepsArgs),
}

/// Arguments of `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Story files to process.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,
    /// Print the documents instead of writing them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments of `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Story files to validate.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments of `steps`.
#[derive(Args, Debug)]
pub struct StepsArgs {
    /// Feature document to read.
    pub feature: Utf8PathBuf,
}

/// How a command finished when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Everything the command looked at was acceptable.
    Success,
    /// At least one story failed validation.
    Invalid,
}

impl RunStatus {
    /// Process exit code for this status.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Invalid => ExitCode::from(1),
        }
    }
}

/// Run `command` with `config`, writing reports to stdout.
///
/// # Errors
///
/// Returns an error when an input cannot be read, an output cannot be
/// written, or stdout is closed.
pub fn run(command: &Commands, config: &CliConfig) -> Result<RunStatus> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Generate(args) => generate(args, config, &mut out),
        Commands::Check(args) => check(args, config, &mut out),
        Commands::Steps(args) => steps(args, &mut out),
    }
}

fn read_text(path: &Utf8Path) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read {path}"))
}

/// Run every story in `args.files` through the pipeline.
///
/// Invalid stories are reported and skipped; the run continues with the
/// next file.
///
/// # Errors
///
/// Returns an error when a story cannot be read or an output cannot be
/// written.
pub fn generate(args: &GenerateArgs, config: &CliConfig, out: &mut dyn Write) -> Result<RunStatus> {
    let pipeline = Pipeline::new(KeywordTable::shared(), config.pipeline_config());
    let sink = if args.dry_run {
        None
    } else {
        Some(
            OutputDir::create(&config.output_dir)
                .wrap_err_with(|| format!("failed to open {}", config.output_dir))?,
        )
    };
    let mut summary = Summary::default();
    for file in &args.files {
        let text = read_text(file)?;
        summary.stories += 1;
        let (feature, steps) = match pipeline.run(&text) {
            Outcome::Rejected(report) => {
                tracing::info!(%file, "story skipped");
                summary.skipped += 1;
                write_skipped(out, file, &report)?;
                continue;
            }
            Outcome::Generated { feature, steps, .. } => (feature, steps),
        };
        summary.features += 1;
        match &sink {
            Some(dir) => {
                let path = dir
                    .write_feature(&feature)
                    .wrap_err_with(|| format!("failed to write feature for {file}"))?;
                write_created(out, &path)?;
            }
            None => write_document(out, &feature_path(&feature.file_name), &feature.text)?,
        }
        let Synthesis::Stubs(step_file) = steps else {
            write_no_steps(out, file)?;
            continue;
        };
        summary.step_files += 1;
        match &sink {
            Some(dir) => {
                let path = dir
                    .write_steps(&step_file)
                    .wrap_err_with(|| format!("failed to write steps for {file}"))?;
                write_created(out, &path)?;
            }
            None => write_document(
                out,
                &steps_path(&step_file.feature_name),
                &step_file.to_string(),
            )?,
        }
    }
    write_summary(out, &summary)?;
    Ok(RunStatus::Success)
}

/// Parse and validate every story in `args.files`.
///
/// # Errors
///
/// Returns an error when a story cannot be read or the report cannot be
/// written.
pub fn check(args: &CheckArgs, config: &CliConfig, out: &mut dyn Write) -> Result<RunStatus> {
    let parser = story_bdd::Parser::new(KeywordTable::shared())
        .with_default_language(config.default_language);
    let mut reports = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let story = parser.parse(&read_text(file)?);
        reports.push(CheckReport::new(file, &validate(&story)));
    }
    if args.json {
        write_check_json(out, &reports)?;
    } else {
        write_check_text(out, &reports)?;
    }
    if reports.iter().all(|report| report.valid) {
        Ok(RunStatus::Success)
    } else {
        Ok(RunStatus::Invalid)
    }
}

/// Print step stubs for the feature document at `args.feature`.
///
/// # Errors
///
/// Returns an error when the document cannot be read, is not valid Gherkin,
/// or the stubs cannot be written.
pub fn steps(args: &StepsArgs, out: &mut dyn Write) -> Result<RunStatus> {
    let keywords = KeywordTable::shared();
    let text = read_text(&args.feature)?;
    let name = args.feature.file_stem().unwrap_or("feature");
    let feature = read_feature(keywords, name, &text)
        .wrap_err_with(|| format!("failed to read steps from {}", args.feature))?;
    match StepSynthesizer::new(keywords).synthesize_feature(&feature) {
        Synthesis::Stubs(file) => write!(out, "{file}")
            .wrap_err_with(|| format!("failed to print steps for {}", args.feature))?,
        Synthesis::NoSteps => write_no_steps(out, &args.feature)?,
    }
    Ok(RunStatus::Success)
}
