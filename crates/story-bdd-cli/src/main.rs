//! `story-bdd` binary entry point.

use std::process::ExitCode;

use clap::Parser;

use story_bdd_cli::cli::{Cli, GlobalArgs, RunStatus, run};
use story_bdd_cli::config::CliConfig;
use story_bdd_cli::error::CliError;
use story_bdd_cli::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);
    tracing::debug!(?config, "starting story-bdd");

    run(&cli.command, &config).map_or_else(
        |e| {
            tracing::error!(error = ?e, "story-bdd failed");
            ExitCode::FAILURE
        },
        RunStatus::exit_code,
    )
}

fn build_config(args: &GlobalArgs) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(args.overrides()))
}
