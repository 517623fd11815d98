#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the layout-guard binary.
#[macro_export]
macro_rules! layout_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("layout-guard"))
    };
}

/// Overlay with a small manifest, so a tiny tree can pass a full run.
pub const SMALL_MANIFEST_CONFIG: &str = r#"
[manifest]
roles = []
directories = [{ path = "docs" }]
files = [{ path = "README.md" }, { path = "LICENSE", optional = true }]
"#;

/// Creates a temporary project tree for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a file of `size` bytes.
    pub fn create_sized_file(&self, relative_path: &str, size: usize) {
        self.create_file(relative_path, &"x".repeat(size));
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes the local `.layout-guard.toml` overlay.
    pub fn create_config(&self, content: &str) {
        self.create_file(".layout-guard.toml", content);
    }

    /// A tree that satisfies `SMALL_MANIFEST_CONFIG`.
    pub fn create_clean_project(&self) {
        self.create_config(SMALL_MANIFEST_CONFIG);
        self.create_sized_file("README.md", 200);
        self.create_sized_file("docs/guide.md", 50);
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}
