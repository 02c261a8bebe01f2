use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Invalid version token {token:?} in {name:?}")]
    InvalidVersionToken { name: String, token: String },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config root is not a mapping: {0}")]
    NotAMapping(PathBuf),

    #[error("Missing config key: {0}")]
    Missing(String),
}
