//! # Helpkit CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command runs
//! inside a scratch project directory so the user's real configuration and any
//! `.helpkit.toml` above the temp directory never leak into a test.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a `Command` for the compiled `helpkit` binary.
pub fn helpkit_cmd() -> Command {
    Command::cargo_bin("helpkit").expect("Failed to find helpkit binary for testing")
}

/// A throwaway application root with a `.git` marker so the project config
/// search stops inside it.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp project dir");
        fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn helpers_dir(&self) -> PathBuf {
        self.root().join("Helpers")
    }

    /// Writes a file relative to the project root, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// `helpkit` running inside this project with an isolated config home.
    pub fn cmd(&self) -> Command {
        let mut cmd = helpkit_cmd();
        cmd.current_dir(self.root())
            .env("HOME", self.root())
            .env("XDG_CONFIG_HOME", self.root().join(".config"))
            .env_remove("HELPKIT_APP_ROOT")
            .env_remove("RUST_LOG");
        cmd
    }
}
