//! Integration tests for `webfs buildfs` using the real binary

mod common;

use common::{TestWorkspace, webfs_cmd};
use predicates::prelude::*;

#[test]
fn test_buildfs_compresses_configured_and_copies_the_rest() {
    let workspace = TestWorkspace::with_frontend();

    webfs_cmd(&workspace)
        .args(["buildfs", "--compress", "js/app.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compressing js/app.js -> js/app.js.gz"))
        .stdout(predicate::str::contains("Copying img/logo.png"))
        .stdout(predicate::str::contains(
            "Processed 2 files: 1 compressed, 1 copied, 0 failed",
        ))
        .stdout(predicate::str::contains("Warning").not());

    assert_eq!(workspace.read_gz("data/js/app.js.gz"), "console.log(1)");
    assert!(!workspace.file_exists("data/js/app.js"));
    assert_eq!(
        workspace.read_bytes("data/img/logo.png"),
        workspace.read_bytes("frontend/img/logo.png")
    );
}

#[test]
fn test_buildfs_warns_about_missing_entries() {
    let workspace = TestWorkspace::new();
    workspace.write_file("frontend/js/app.js", "console.log(1)");

    webfs_cmd(&workspace)
        .args([
            "buildfs",
            "--compress",
            "js/app.js",
            "--compress",
            "js/missing.js",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Warning: The following files were not found: js/missing.js",
        ));

    assert!(workspace.file_exists("data/js/app.js.gz"));
    assert!(!workspace.file_exists("data/js/missing.js.gz"));
}

#[test]
fn test_buildfs_default_policy_reports_absent_assets() {
    let workspace = TestWorkspace::with_frontend();

    webfs_cmd(&workspace)
        .arg("buildfs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compressing js/app.js -> js/app.js.gz"))
        .stdout(predicate::str::contains("css/uPlot.min.css"))
        .stdout(predicate::str::contains("webfonts/fa-solid-900.woff2"));

    assert!(workspace.file_exists("data/js/app.js.gz"));
}

#[test]
fn test_buildfs_mirrors_nested_directories() {
    let workspace = TestWorkspace::new();
    workspace.write_file("frontend/index.html", "<html></html>");
    workspace.write_file("frontend/a/b/c/deep.txt", "deep");
    workspace.write_file("frontend/a/b/c/deep.js", "let x;");

    webfs_cmd(&workspace)
        .args(["buildfs", "--compress", "a/b/c/deep.js"])
        .assert()
        .success();

    assert_eq!(workspace.read_file("data/index.html"), "<html></html>");
    assert_eq!(workspace.read_file("data/a/b/c/deep.txt"), "deep");
    assert_eq!(workspace.read_gz("data/a/b/c/deep.js.gz"), "let x;");
}

#[test]
fn test_buildfs_is_repeatable() {
    let workspace = TestWorkspace::with_frontend();

    webfs_cmd(&workspace)
        .args(["buildfs", "--compress", "js/app.js"])
        .assert()
        .success();
    let first = workspace.read_bytes("data/js/app.js.gz");

    webfs_cmd(&workspace)
        .args(["buildfs", "--compress", "js/app.js"])
        .assert()
        .success();
    let second = workspace.read_bytes("data/js/app.js.gz");

    assert_eq!(first, second);
}

#[test]
fn test_buildfs_reports_per_file_failure_and_continues() {
    let workspace = TestWorkspace::with_frontend();
    workspace.write_file("frontend/css/site.css", "body{}");
    // A plain file where the css output directory has to go
    workspace.write_file("data/css", "in the way");

    webfs_cmd(&workspace)
        .args(["buildfs", "--compress", "js/app.js"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Error processing css/site.css"))
        .stdout(predicate::str::contains("1 failed"));

    assert!(workspace.file_exists("data/js/app.js.gz"));
    assert!(workspace.file_exists("data/img/logo.png"));
}

#[test]
fn test_buildfs_strict_fails_on_missing_entries() {
    let workspace = TestWorkspace::with_frontend();

    webfs_cmd(&workspace)
        .args(["buildfs", "--strict", "--compress", "js/nope.js"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    // Output is still written before the strict check
    assert!(workspace.file_exists("data/js/app.js"));
}

#[test]
fn test_buildfs_strict_succeeds_when_clean() {
    let workspace = TestWorkspace::with_frontend();

    webfs_cmd(&workspace)
        .args(["buildfs", "--strict", "--compress", "js/app.js"])
        .assert()
        .success();
}

#[test]
fn test_buildfs_json_report() {
    let workspace = TestWorkspace::with_frontend();

    let output = webfs_cmd(&workspace)
        .args([
            "buildfs",
            "--json",
            "--compress",
            "js/app.js",
            "--compress",
            "js/gone.js",
        ])
        .output()
        .expect("webfs should run");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be a JSON report");
    assert_eq!(report["compressed"], 1);
    assert_eq!(report["copied"], 1);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["missing"], serde_json::json!(["js/gone.js"]));
    assert_eq!(report["dry_run"], false);
}

#[test]
fn test_buildfs_uses_config_file() {
    let workspace = TestWorkspace::new();
    workspace.write_file("web/main.js", "main()");
    workspace.write_file("web/readme.txt", "hi");
    workspace.write_file("webfs.yaml", "source: web\ndest: out\ncompress:\n  - main.js\n");

    webfs_cmd(&workspace).arg("buildfs").assert().success();

    assert_eq!(workspace.read_gz("out/main.js.gz"), "main()");
    assert_eq!(workspace.read_file("out/readme.txt"), "hi");
    assert!(!workspace.file_exists("data"));
}

#[test]
fn test_buildfs_flags_override_config_file() {
    let workspace = TestWorkspace::new();
    workspace.write_file("web/main.js", "main()");
    workspace.write_file("webfs.yaml", "source: web\ndest: out\ncompress: []\n");

    webfs_cmd(&workspace)
        .args(["buildfs", "--dest", "other", "--compress", "main.js"])
        .assert()
        .success();

    assert!(workspace.file_exists("other/main.js.gz"));
    assert!(!workspace.file_exists("out"));
}

#[test]
fn test_buildfs_environment_roots() {
    let workspace = TestWorkspace::new();
    workspace.write_file("assets/page.html", "<p></p>");

    webfs_cmd(&workspace)
        .env("WEBFS_SOURCE", "assets")
        .env("WEBFS_DEST", "image")
        .args(["buildfs", "--compress", "page.html"])
        .assert()
        .success();

    assert_eq!(workspace.read_gz("image/page.html.gz"), "<p></p>");
}

#[test]
fn test_buildfs_missing_source_is_fatal() {
    let workspace = TestWorkspace::new();

    webfs_cmd(&workspace)
        .arg("buildfs")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("frontend"));

    assert!(!workspace.file_exists("data"));
}

#[test]
fn test_buildfs_rejects_destination_inside_source() {
    let workspace = TestWorkspace::with_frontend();

    webfs_cmd(&workspace)
        .args(["buildfs", "--dest", "frontend/out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(!workspace.file_exists("frontend/out"));
}

#[test]
fn test_buildfs_invalid_config_is_fatal() {
    let workspace = TestWorkspace::with_frontend();
    workspace.write_file("webfs.yaml", "sauce: web\n");

    webfs_cmd(&workspace)
        .arg("buildfs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_buildfs_quiet_prints_nothing_on_success() {
    let workspace = TestWorkspace::with_frontend();

    webfs_cmd(&workspace)
        .args(["-q", "buildfs", "--compress", "js/app.js"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(workspace.file_exists("data/js/app.js.gz"));
}
