//! webfs - web asset bundler
//!
//! Builds the firmware's filesystem image tree from the web frontend:
//! configured assets are gzip-compressed, everything else is copied, and
//! configured assets that do not exist are reported.

use clap::Parser;
use miette::Diagnostic;

mod bundler;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod path_utils;
mod policy;
mod trigger;
mod ui;

use cli::{BuildArgs, Cli, Commands};
use error::WebfsError;
use trigger::Activation;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let token_given = matches!(cli.command, Some(Commands::Buildfs(_)));
    let activation = Activation::from_env(token_given);

    let result = match (cli.command, activation) {
        (Some(Commands::Buildfs(args)), Some(activation)) => {
            commands::build::run(cli.config, args, activation, cli.quiet)
        }
        (Some(Commands::Version), _) => commands::version::run(),
        (Some(Commands::Completions(args)), _) => commands::completions::run(args),
        (None, Some(activation)) => {
            commands::build::run(cli.config, BuildArgs::from_env(), activation, cli.quiet)
        }
        (Some(Commands::Buildfs(_)) | None, None) => {
            commands::idle();
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&e);
        std::process::exit(1);
    }
}

fn print_error(e: &WebfsError) {
    eprintln!("Error: {e}");
    if let Some(help) = e.help() {
        eprintln!("  help: {help}");
    }
}
