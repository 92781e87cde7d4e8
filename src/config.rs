use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Template defaults
// =============================================================================

/// Package clause of generated files
pub const DEFAULT_PACKAGE: &str = "mock";

/// Appended to the interface name to form the stub type name
pub const DEFAULT_SUFFIX: &str = "Mock";

/// External formatter used when `formatter.kind` is `gofmt`
pub const DEFAULT_FORMATTER_COMMAND: &str = "gofmt";

// =============================================================================
// Batch and server defaults
// =============================================================================

/// Directories whose name contains this marker hold generated mocks
pub const MOCK_DIR_MARKER: &str = "mock";

/// How deep the mock folder search descends below the root's parent
pub const PARENT_SEARCH_DEPTH: usize = 3;

/// Listen address of the HTTP surface
pub const DEFAULT_SERVER_ADDRESS: &str = "localhost:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// go-mocker configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MockerConfig {
    pub template: TemplateConfig,
    pub formatter: FormatterConfig,
    /// Where batch mode writes mocks; discovered when unset
    pub output_dir: Option<PathBuf>,
    pub server: ServerConfig,
}

impl MockerConfig {
    /// Load from a JSON file, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Generated file layout
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplateConfig {
    pub package: String,
    pub suffix: String,
    /// Generate `<Method>Fn` fields the stub delegates to when set
    pub hooks: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            hooks: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// In-process tree-sitter check and re-indent
    #[default]
    Builtin,
    /// External command reading source on stdin
    Gofmt,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormatterConfig {
    pub kind: FormatterKind,
    pub command: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            kind: FormatterKind::Builtin,
            command: DEFAULT_FORMATTER_COMMAND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_SERVER_ADDRESS.to_string(),
        }
    }
}

/// Returns the path to the data directory for go-mocker.
/// Uses $XDG_DATA_HOME/go-mocker if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/go-mocker,
/// or ./go-mocker if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the directory holding log files.
pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("go-mocker")
}
