//! Shared fixtures for driving the `trash-sweep` binary against throwaway
//! trash stores.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns a command for the binary under test with a scrubbed environment.
///
/// `RUST_LOG` is removed so ambient debug output cannot leak into stderr
/// assertions.
pub fn sweep_command() -> Command {
    let mut command = Command::cargo_bin("trash-sweep").expect("trash-sweep binary under test");
    command.env_remove("RUST_LOG");
    command
}

/// A disposable trash store with the `info/` and `files/` layout.
pub struct StoreFixture {
    dir: TempDir,
}

impl StoreFixture {
    /// Creates an empty store inside a fresh temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temporary store root");
        fs::create_dir_all(dir.path().join("info")).expect("info directory");
        fs::create_dir_all(dir.path().join("files")).expect("files directory");
        Self { dir }
    }

    /// The store root, suitable for `--trash-path`.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The store root as a UTF-8 string argument.
    pub fn root_arg(&self) -> &str {
        self.dir.path().to_str().expect("utf8 store root")
    }

    /// Seeds one trashed entry: a sidecar plus content of the given size.
    pub fn seed(&self, name: &str, deleted_on: &str, content_bytes: usize) {
        self.seed_sidecar(name, deleted_on);
        fs::write(self.files_path(name), vec![b'x'; content_bytes]).expect("content");
    }

    /// Seeds a sidecar with no matching content under `files/`.
    pub fn seed_sidecar(&self, name: &str, deleted_on: &str) {
        fs::write(
            self.dir.path().join("info").join(format!("{name}.trashinfo")),
            format!("[Trash Info]\nPath=/home/user/{name}\nDeletionDate={deleted_on}\n"),
        )
        .expect("sidecar");
    }

    /// Path of an entry's content under `files/`.
    pub fn files_path(&self, name: &str) -> PathBuf {
        self.dir.path().join("files").join(name)
    }

    /// Path of an entry's sidecar under `info/`.
    pub fn info_path(&self, name: &str) -> PathBuf {
        self.dir.path().join("info").join(format!("{name}.trashinfo"))
    }

    /// True while both the sidecar and the content survive.
    pub fn holds(&self, name: &str) -> bool {
        self.info_path(name).exists() && self.files_path(name).exists()
    }

    /// True once both the sidecar and the content are gone.
    pub fn purged(&self, name: &str) -> bool {
        !self.info_path(name).exists() && !self.files_path(name).exists()
    }
}

/// A deletion date old enough to exceed any realistic age threshold.
pub const ANCIENT: &str = "2020-01-01T12:00:00";

/// A deletion date far enough ahead to stay inside any age threshold.
pub const FRESH: &str = "2999-01-01T12:00:00";
