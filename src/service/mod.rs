//! Orchestration around the synthesis engine
//! - locator.rs: finds the files declaring requested interfaces
//! - sink.rs: where batch-generated mocks are written
//!
//! Batch mode synthesizes one mock per (interface, file) pair concurrently and
//! isolates failures per pair. Single-request mode takes one source text that
//! must declare exactly one interface.

pub mod locator;
pub mod sink;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use crate::error::MockError;
use crate::mocker::Mocker;
use locator::{InterfaceTable, interfaces_at, locate_interfaces, resolve_go_path};
use sink::OutputSink;

/// What a batch run should generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchRequest {
    /// Search the tree for each name
    Search(Vec<String>),
    /// Every interface declared in one file
    File(PathBuf),
    /// The given names, all declared in one file
    Pairs {
        file: PathBuf,
        interfaces: Vec<String>,
    },
}

impl BatchRequest {
    /// Request for an optional file path and a list of interface names
    pub fn from_args(file: Option<PathBuf>, interfaces: Vec<String>) -> Result<Self, MockError> {
        match (file, interfaces.is_empty()) {
            (None, true) => Err(MockError::Usage),
            (None, false) => Ok(BatchRequest::Search(interfaces)),
            (Some(file), true) => Ok(BatchRequest::File(resolve_go_path(&file))),
            (Some(file), false) => Ok(BatchRequest::Pairs {
                file: resolve_go_path(&file),
                interfaces,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMock {
    pub interface: String,
    pub source: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct FailedMock {
    pub interface: String,
    pub error: MockError,
}

/// Outcome of a batch run, in request order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<GeneratedMock>,
    pub failed: Vec<FailedMock>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && !self.generated.is_empty()
    }
}

pub struct MockService {
    mocker: Arc<Mocker>,
    root: PathBuf,
}

impl MockService {
    pub fn new(mocker: Mocker, root: impl Into<PathBuf>) -> Self {
        Self {
            mocker: Arc::new(mocker),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Interface name -> declaring file for `request`
    pub async fn resolve(&self, request: &BatchRequest) -> Result<InterfaceTable, MockError> {
        match request {
            BatchRequest::Search(names) => {
                Ok(locate_interfaces(Arc::clone(&self.mocker), &self.root, names).await)
            }
            BatchRequest::File(file) => {
                let mocker = Arc::clone(&self.mocker);
                let file = file.clone();
                tokio::task::spawn_blocking(move || interfaces_at(&mocker, &file))
                    .await
                    .map_err(|e| MockError::io(&self.root, std::io::Error::other(e)))?
            }
            BatchRequest::Pairs { file, interfaces } => Ok(interfaces
                .iter()
                .map(|name| (name.clone(), file.clone()))
                .collect()),
        }
    }

    /// Generate one mock per resolved pair and hand each to `sink`
    ///
    /// Fails with `NoMatches` only when nothing could be resolved; per-pair
    /// failures are logged and reported without stopping the others.
    pub async fn process(
        &self,
        request: &BatchRequest,
        sink: Arc<dyn OutputSink>,
    ) -> Result<BatchReport, MockError> {
        let table = self.resolve(request).await?;
        if table.is_empty() {
            return Err(MockError::NoMatches);
        }
        info!("Generating {} mocks", table.len());

        let units = table.into_iter().map(|(interface, source)| {
            let mocker = Arc::clone(&self.mocker);
            let sink = Arc::clone(&sink);
            async move {
                let result = generate_one(mocker, sink, &interface, &source).await;
                (interface, source, result)
            }
        });

        let mut report = BatchReport::default();
        for (interface, source, result) in join_all(units).await {
            match result {
                Ok(output) => {
                    info!("Generated mock for {} at {}", interface, output.display());
                    report.generated.push(GeneratedMock {
                        interface,
                        source,
                        output,
                    });
                }
                Err(e) => {
                    error!(
                        "Failed to generate mock for {} from {}: {}",
                        interface,
                        source.display(),
                        e
                    );
                    report.failed.push(FailedMock {
                        interface,
                        error: e,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Mock for the only interface declared in `source`
    pub fn process_one(&self, source: &str) -> Result<String, MockError> {
        let names = self.mocker.interface_names(source);
        match names.as_slice() {
            [] => Err(MockError::NoInterface),
            [name] => self.mocker.synthesize(source, name),
            _ => Err(MockError::AmbiguousInput(names)),
        }
    }
}

async fn generate_one(
    mocker: Arc<Mocker>,
    sink: Arc<dyn OutputSink>,
    interface: &str,
    source: &Path,
) -> Result<PathBuf, MockError> {
    let text = tokio::fs::read_to_string(source)
        .await
        .map_err(|e| MockError::io(source, e))?;

    let name = interface.to_string();
    let rendered = tokio::task::spawn_blocking(move || mocker.synthesize(&text, &name))
        .await
        .map_err(|e| MockError::io(source, std::io::Error::other(e)))??;

    sink.write(interface, &rendered).await
}
