//! buildfs command implementation
//!
//! Resolves the configuration (defaults, webfs.yaml, flags), then hands the
//! explicit roots and policy to the bundler.

use std::path::{Path, PathBuf};

use crate::bundler::{Bundler, RunReport};
use crate::cli::BuildArgs;
use crate::config::{BuildConfig, Overrides};
use crate::error::{Result, WebfsError};
use crate::trigger::Activation;
use crate::ui::{ConsoleReporter, ProgressReporter, RunReporter, SilentReporter};

/// Run the buildfs command
pub fn run(
    config_path: Option<PathBuf>,
    args: BuildArgs,
    activation: Activation,
    quiet: bool,
) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| WebfsError::IoError {
        message: format!("Failed to get current directory: {e}"),
    })?;
    let config = resolve_config(config_path.as_deref(), &cwd, &args)?;

    tracing::info!(
        activation = activation.describe(),
        source = %config.source.display(),
        dest = %config.dest.display(),
        "building filesystem image tree"
    );

    let bundler = Bundler::new(&config.source, &config.dest, config.policy()).dry_run(args.dry_run);
    if bundler.policy().is_empty() {
        tracing::warn!("no files configured for compression; every file will be copied");
    } else {
        let entries: Vec<&str> = bundler.policy().iter().collect();
        tracing::debug!(count = bundler.policy().len(), ?entries, "compression policy");
    }

    let mut reporter = reporter_for(&args, quiet);
    let report = bundler.run(reporter.as_mut())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    check_strict(&report, args.strict)
}

/// Defaults, then the configuration file, then flags and environment
pub fn resolve_config(config_path: Option<&Path>, cwd: &Path, args: &BuildArgs) -> Result<BuildConfig> {
    let config = BuildConfig::discover(config_path, cwd)?.with_overrides(Overrides {
        source: args.source.clone(),
        dest: args.dest.clone(),
        compress: args.compress.clone(),
    });
    config.validate()?;
    Ok(config)
}

fn reporter_for(args: &BuildArgs, quiet: bool) -> Box<dyn RunReporter> {
    if args.json || quiet {
        Box::new(SilentReporter)
    } else if args.progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(ConsoleReporter::new())
    }
}

fn check_strict(report: &RunReport, strict: bool) -> Result<()> {
    if strict && !report.is_clean() {
        return Err(WebfsError::BuildIncomplete {
            failed: report.failed,
            missing: report.missing.len(),
        });
    }
    Ok(())
}
