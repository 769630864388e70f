//! Run presentation layer
//!
//! This module handles:
//! - One line per processed file, plus a final missing-file warning
//! - An interactive progress bar using indicatif
//! - Silent reporting for `--quiet` and `--json`
//!
//! The bundler talks only to the [`RunReporter`] trait, so the command layer
//! picks the implementation from command-line flags.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::bundler::{Action, RunReport};

/// Receives events from a bundler run
pub trait RunReporter {
    /// Called once, after the source tree has been listed
    fn start(&mut self, total_files: usize, dry_run: bool);

    /// A file is about to be compressed or copied
    fn file(&mut self, rel: &str, action: Action, dest_rel: &str);

    /// A file or directory entry could not be processed
    fn failed(&mut self, path: &str, reason: &str);

    /// Called once with the final report
    fn finish(&mut self, report: &RunReport);
}

/// Plain line-per-file output on stdout, failures on stderr
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    dry_run: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunReporter for ConsoleReporter {
    fn start(&mut self, total_files: usize, dry_run: bool) {
        self.dry_run = dry_run;
        tracing::debug!(total_files, "processing files");
    }

    fn file(&mut self, rel: &str, action: Action, dest_rel: &str) {
        println!("{}", file_line(rel, action, dest_rel, self.dry_run));
    }

    fn failed(&mut self, path: &str, reason: &str) {
        eprintln!("{}", Style::new().red().apply_to(failure_line(path, reason)));
    }

    fn finish(&mut self, report: &RunReport) {
        if let Some(line) = missing_line(&report.missing) {
            println!("{}", Style::new().yellow().apply_to(line));
        }
        println!("{}", Style::new().bold().apply_to(summary_line(report)));
    }
}

/// Progress bar output; per-file lines are replaced by the bar
#[derive(Default)]
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self { bar: None }
    }
}

impl RunReporter for ProgressReporter {
    fn start(&mut self, total_files: usize, dry_run: bool) {
        let bar = ProgressBar::new(total_files as u64);
        let template = if dry_run {
            "[DRY RUN] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
        } else {
            "[{bar:40.cyan/blue}] {pos}/{len} {msg}"
        };
        match ProgressStyle::default_bar().template(template) {
            Ok(style) => bar.set_style(style.progress_chars("#>-")),
            Err(e) => tracing::debug!(error = %e, "invalid progress template"),
        }
        self.bar = Some(bar);
    }

    fn file(&mut self, rel: &str, _action: Action, _dest_rel: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(truncate_path(rel, 50));
            bar.inc(1);
        }
    }

    fn failed(&mut self, path: &str, reason: &str) {
        let line = Style::new().red().apply_to(failure_line(path, reason)).to_string();
        match self.bar {
            Some(ref bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }

    fn finish(&mut self, report: &RunReport) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        if let Some(line) = missing_line(&report.missing) {
            println!("{}", Style::new().yellow().apply_to(line));
        }
        println!("{}", Style::new().bold().apply_to(summary_line(report)));
    }
}

/// Reports nothing
#[derive(Debug, Default)]
pub struct SilentReporter;

impl RunReporter for SilentReporter {
    fn start(&mut self, _total_files: usize, _dry_run: bool) {}

    fn file(&mut self, _rel: &str, _action: Action, _dest_rel: &str) {}

    fn failed(&mut self, _path: &str, _reason: &str) {}

    fn finish(&mut self, _report: &RunReport) {}
}

/// `Compressing a -> a.gz` or `Copying b`
pub fn file_line(rel: &str, action: Action, dest_rel: &str, dry_run: bool) -> String {
    let prefix = if dry_run { "[DRY RUN] " } else { "" };
    match action {
        Action::Compress => format!("{prefix}Compressing {rel} -> {dest_rel}"),
        Action::Copy => format!("{prefix}Copying {rel}"),
    }
}

pub fn failure_line(path: &str, reason: &str) -> String {
    format!("Error processing {path}: {reason}")
}

/// Single warning line naming every missing entry, or `None` if there are none
pub fn missing_line(missing: &[String]) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    Some(format!(
        "Warning: The following files were not found: {}",
        missing.join(", ")
    ))
}

pub fn summary_line(report: &RunReport) -> String {
    let verb = if report.dry_run { "Would process" } else { "Processed" };
    format!(
        "{verb} {} file{}: {} compressed, {} copied, {} failed",
        report.processed(),
        if report.processed() == 1 { "" } else { "s" },
        report.compressed,
        report.copied,
        report.failed
    )
}

fn truncate_path(path: &str, max: usize) -> String {
    let count = path.chars().count();
    if count <= max {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max - 3)).collect();
    format!("...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_line_compress() {
        assert_eq!(
            file_line("js/app.js", Action::Compress, "js/app.js.gz", false),
            "Compressing js/app.js -> js/app.js.gz"
        );
    }

    #[test]
    fn test_file_line_copy_dry_run() {
        assert_eq!(
            file_line("img/logo.png", Action::Copy, "img/logo.png", true),
            "[DRY RUN] Copying img/logo.png"
        );
    }

    #[test]
    fn test_missing_line() {
        assert_eq!(missing_line(&[]), None);
        assert_eq!(
            missing_line(&["js/missing.js".to_string(), "css/a.css".to_string()]).unwrap(),
            "Warning: The following files were not found: js/missing.js, css/a.css"
        );
    }

    #[test]
    fn test_summary_line() {
        let report = RunReport {
            compressed: 1,
            copied: 2,
            failed: 1,
            ..Default::default()
        };
        assert_eq!(
            summary_line(&report),
            "Processed 3 files: 1 compressed, 2 copied, 1 failed"
        );
    }

    #[test]
    fn test_summary_line_singular_dry_run() {
        let report = RunReport {
            copied: 1,
            dry_run: true,
            ..Default::default()
        };
        assert_eq!(
            summary_line(&report),
            "Would process 1 file: 0 compressed, 1 copied, 0 failed"
        );
    }

    #[test]
    fn test_truncate_path() {
        assert_eq!(truncate_path("js/app.js", 50), "js/app.js");
        let long = "a/".repeat(40);
        let truncated = truncate_path(&long, 20);
        assert_eq!(truncated.chars().count(), 20);
        assert!(truncated.starts_with("..."));
    }

    #[test]
    fn test_silent_reporter_accepts_events() {
        let mut reporter = SilentReporter;
        reporter.start(1, false);
        reporter.file("a", Action::Copy, "a");
        reporter.failed("a", "boom");
        reporter.finish(&RunReport::default());
    }
}
