//! Go source trees on disk

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory populated with Go files
pub struct GoWorkspace {
    dir: TempDir,
}

impl GoWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `contents` to `relative`, creating parent directories
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
        self
    }

    pub fn with_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.dir.path().join(relative)).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).unwrap()
    }
}

/// Contents of `tests/fixtures/<relative>`
pub fn fixture(relative: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub const READER_SOURCE: &str = "package io

type Reader interface {
	Read(p []byte) (n int, err error)
}
";

pub const WRITER_SOURCE: &str = "package io

type Writer interface {
	Write(p []byte) (n int, err error)
}
";
