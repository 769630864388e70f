//! Activation contract with the firmware build orchestrator
//!
//! The bundler only runs when explicitly asked to: either the `buildfs`
//! token is given on the command line, or the orchestrator exports
//! `PROJECT_TASK=buildfs`. Without either, nothing touches the filesystem.

/// Command-line token (and subcommand name) that requests a filesystem build
pub const TRIGGER_TOKEN: &str = "buildfs";

/// Environment variable the build orchestrator sets to the current task
pub const TRIGGER_ENV: &str = "PROJECT_TASK";

/// Why a run was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// `buildfs` was given on the command line
    Argument,
    /// `PROJECT_TASK=buildfs` was set
    Environment,
}

impl Activation {
    /// Decide whether to run. Either signal alone is enough; the argument is
    /// reported when both are present.
    pub fn resolve(token_given: bool, task_env: Option<&str>) -> Option<Self> {
        if token_given {
            Some(Activation::Argument)
        } else if task_env == Some(TRIGGER_TOKEN) {
            Some(Activation::Environment)
        } else {
            None
        }
    }

    /// Read the orchestrator's task from the process environment
    pub fn from_env(token_given: bool) -> Option<Self> {
        let task = std::env::var(TRIGGER_ENV).ok();
        Self::resolve(token_given, task.as_deref())
    }

    pub fn describe(self) -> &'static str {
        match self {
            Activation::Argument => "command-line token",
            Activation::Environment => "PROJECT_TASK environment variable",
        }
    }
}
