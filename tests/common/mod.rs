//! Common test utilities for webfs integration tests

use std::io::Read;
use std::path::PathBuf;

use assert_cmd::Command;
use flate2::read::GzDecoder;
use tempfile::TempDir;

/// A project directory with a `frontend/` source tree and a `data/` destination
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the project root
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// The two-file frontend used by most tests
    #[allow(dead_code)]
    pub fn with_frontend() -> Self {
        let workspace = Self::new();
        workspace.write_file("frontend/js/app.js", "console.log(1)");
        workspace.write_file("frontend/img/logo.png", "\u{89}PNG fake image");
        workspace
    }

    /// Write a file in the workspace, creating parent directories
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Decompress a `.gz` output
    #[allow(dead_code)]
    pub fn read_gz(&self, path: &str) -> String {
        let file = std::fs::File::open(self.path.join(path)).expect("Failed to open gzip file");
        let mut decoded = String::new();
        GzDecoder::new(file)
            .read_to_string(&mut decoded)
            .expect("Failed to decompress gzip file");
        decoded
    }

    #[allow(dead_code)]
    pub fn read_bytes(&self, path: &str) -> Vec<u8> {
        std::fs::read(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The webfs binary with a clean environment, running inside `workspace`
#[allow(deprecated)]
pub fn webfs_cmd(workspace: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("webfs").expect("webfs binary should be built");
    // Developer shells may carry these; tests must not pick them up
    for var in [
        "PROJECT_TASK",
        "WEBFS_SOURCE",
        "WEBFS_DEST",
        "WEBFS_CONFIG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.current_dir(&workspace.path);
    cmd
}
