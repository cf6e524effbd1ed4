//! Subcommand handlers.
//!
//! Each handler returns the rendered output instead of printing it, so the
//! whole command path can be exercised from tests.

use anyhow::{Context, Result};
use paye_core::{compare_regimes, summarize};
use paye_data::{ScenarioBatch, ScenarioLoader};
use tracing::{debug, info, warn};

use crate::cli::{BatchArgs, Cli, Command, ProfileArgs};
use crate::config::AppConfig;
use crate::output::{render_batch, render_comparison, render_summary};

/// Resolves settings from the config file and flags.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let config = AppConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(cli.overrides());
    Ok(config)
}

pub fn compute(
    args: &ProfileArgs,
    config: &AppConfig,
) -> Result<String> {
    let profile = args.to_profile(config.tax_year);
    let summary = summarize(&profile).context("tax computation failed")?;
    render_summary(&summary, config.format)
}

pub fn compare(
    args: &ProfileArgs,
    config: &AppConfig,
) -> Result<String> {
    let profile = args.to_profile(config.tax_year);
    let comparison = compare_regimes(&profile).context("regime comparison failed")?;
    render_comparison(&comparison, config.format)
}

pub fn batch(
    args: &BatchArgs,
    config: &AppConfig,
) -> Result<String> {
    let rows = ScenarioLoader::load_from_file(&args.file)
        .with_context(|| format!("failed to load scenarios from {}", args.file.display()))?;
    let outcomes = ScenarioBatch::evaluate(rows);

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        warn!(failed, total = outcomes.len(), "some scenarios failed");
    } else {
        info!(total = outcomes.len(), "all scenarios evaluated");
    }
    render_batch(&outcomes, config.format)
}

pub fn execute(
    command: &Command,
    config: &AppConfig,
) -> Result<String> {
    match command {
        Command::Compute(args) => compute(args, config),
        Command::Compare(args) => compare(args, config),
        Command::Batch(args) => batch(args, config),
    }
}

/// Runs one invocation. Logging must already be initialized.
pub fn run(
    cli: &Cli,
    config: &AppConfig,
) -> Result<()> {
    debug!(?config, "resolved configuration");

    let output = execute(&cli.command, config)?;
    println!("{output}");
    Ok(())
}
