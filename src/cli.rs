//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// webfs - web asset bundler for the firmware filesystem image
///
/// Mirrors the web frontend into the filesystem staging directory,
/// gzip-compressing the configured assets.
#[derive(Parser, Debug)]
#[command(
    name = "webfs",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Web asset bundler for the firmware filesystem image",
    long_about = "webfs mirrors a web frontend directory into the filesystem image staging \
                  directory. Configured assets are stored gzip-compressed as <path>.gz, \
                  everything else is copied unchanged.\n\n\
                  Nothing is written unless the `buildfs` command is given or \
                  PROJECT_TASK=buildfs is set.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  webfs buildfs\n    \
                  webfs buildfs --source frontend --dest data\n    \
                  webfs buildfs --compress js/app.js --compress css/site.css\n    \
                  webfs buildfs --dry-run\n    \
                  PROJECT_TASK=buildfs webfs"
)]
pub struct Cli {
    /// Configuration file (defaults to ./webfs.yaml when present)
    #[arg(long, short = 'c', global = true, env = "WEBFS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the filesystem image tree from the web assets
    Buildfs(BuildArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the buildfs command
#[derive(Args, Debug, Clone, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Build with webfs.yaml or the defaults:\n    webfs buildfs\n\n\
                  Build from another directory:\n    webfs buildfs --source web --dest out\n\n\
                  Compress only selected files:\n    webfs buildfs --compress js/app.js\n\n\
                  Show what would happen:\n    webfs buildfs --dry-run\n\n\
                  Fail on missing or failed files (CI):\n    webfs buildfs --strict\n\n\
                  Machine-readable report:\n    webfs buildfs --json")]
pub struct BuildArgs {
    /// Source directory of the web assets
    #[arg(long, short = 's', env = "WEBFS_SOURCE", value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Destination directory of the filesystem image tree
    #[arg(long, short = 'd', env = "WEBFS_DEST", value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// File to compress, relative to the source directory (repeatable; replaces the configured list)
    #[arg(long = "compress", value_name = "PATH")]
    pub compress: Vec<String>,

    /// Show what would be done without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error if any file failed or a configured file is missing
    #[arg(long)]
    pub strict: bool,

    /// Print the run report as JSON
    #[arg(long, conflicts_with = "progress")]
    pub json: bool,

    /// Show a progress bar instead of one line per file
    #[arg(long)]
    pub progress: bool,
}

/// Reads `BuildArgs` from the environment only, for orchestrator-triggered runs
#[derive(Parser, Debug)]
#[command(name = "webfs")]
struct EnvBuildArgs {
    #[command(flatten)]
    args: BuildArgs,
}

impl BuildArgs {
    /// `WEBFS_SOURCE` / `WEBFS_DEST` when set, everything else at defaults
    pub fn from_env() -> Self {
        EnvBuildArgs::try_parse_from(["webfs"])
            .map(|parsed| parsed.args)
            .unwrap_or_default()
    }
}

/// Arguments for completions command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    webfs completions --shell bash > ~/.bash_completion.d/webfs\n\n\
                  Generate zsh completions:\n    webfs completions --shell zsh > ~/.zfunc/_webfs")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum)]
    pub shell: clap_complete::Shell,
}
