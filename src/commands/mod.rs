//! Command implementations for the webfs CLI

pub mod build;
pub mod completions;
pub mod version;

use crate::trigger::{TRIGGER_ENV, TRIGGER_TOKEN};

/// Invoked without `buildfs` and without the orchestrator's task variable
pub fn idle() {
    println!(
        "Nothing to do: run `webfs {TRIGGER_TOKEN}` or set {TRIGGER_ENV}={TRIGGER_TOKEN} to build the filesystem image tree."
    );
}
