//! Configuration file (`tvm-abi.toml`).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG: &str = "tvm-abi.toml";

/// CLI configuration. Every section and key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub generate: GenerateConfig,
    pub logging: LoggingConfig,
}

/// Binding generation settings.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Directory holding `<Contract>.abi.json` files.
    pub abi_dir: PathBuf,
    /// Directory the bindings are written to.
    pub out_dir: PathBuf,
    /// Contracts to generate; all schemas in `abi_dir` when empty.
    pub contracts: Vec<String>,
    /// Crate path generated code imports its runtime from.
    pub runtime_crate: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            abi_dir: PathBuf::from("build"),
            out_dir: PathBuf::from("bindings"),
            contracts: Vec::new(),
            runtime_crate: "tvm_abi".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"tvm_abi_gen=debug"`.
    pub level: String,
    pub format: LogFormat,
    /// `"stdout"`, `"stderr"` or a file path.
    pub output: String,
    /// ANSI colors when writing to a terminal.
    pub color: bool,
    pub timestamps: bool,
    /// Include the event target (module path).
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            color: true,
            timestamps: false,
            target: false,
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG`] is read
    /// when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG).is_file() => Self::from_file(DEFAULT_CONFIG),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
