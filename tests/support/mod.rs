//! Test support utilities for lockbox integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]


#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own working dir (holding the store and key files) and
/// home dir. Child processes use `.current_dir()` so tests can run in
/// parallel.
pub struct Test {
    /// Working directory for the store and keys
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create an empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with key files written to the working dir.
    ///
    /// See [`fixtures`] for the file names.
    pub fn with_keys() -> Self {
        let t = Self::new();
        fixtures::write_keys(t.dir.path());
        t
    }

    /// Path of a file inside the working dir.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Default store file path.
    pub fn store(&self) -> PathBuf {
        self.path(STORE)
    }

    /// Write raw bytes as the store file.
    pub fn write_store(&self, contents: &[u8]) {
        std::fs::write(self.store(), contents).expect("failed to write store");
    }

    /// Raw bytes of the store file.
    pub fn read_store(&self) -> Vec<u8> {
        std::fs::read(self.store()).expect("failed to read store")
    }
}
