//! Output sinks for generated mocks

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::error::MockError;
use crate::parser::types::lower_first;

/// Destination that receives rendered stubs in batch mode
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait OutputSink: Send + Sync {
    /// Stores the stub for `interface` and returns where it went
    async fn write(&self, interface: &str, contents: &str) -> Result<PathBuf, MockError>;
}

/// File name of the mock generated for `interface` (e.g., "reader.go")
pub fn mock_file_name(interface: &str) -> String {
    format!("{}.go", lower_first(interface))
}

/// Writes each stub to `<dir>/<interface>.go`, creating the directory on demand
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, interface: &str) -> PathBuf {
        self.dir.join(mock_file_name(interface))
    }
}

#[async_trait::async_trait]
impl OutputSink for DirSink {
    async fn write(&self, interface: &str, contents: &str) -> Result<PathBuf, MockError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| MockError::io(&self.dir, e))?;

        let path = self.path_for(interface);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| MockError::io(&path, e))?;

        debug!("Wrote mock for {} to {}", interface, path.display());
        Ok(path)
    }
}
