use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SitefigError {
    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in config file")]
    UnknownKeys(Vec<SitefigError>),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Malformed base configuration: '{field}' is {reason}")]
    MalformedBase { field: String, reason: String },

    #[error("Base configuration file not found: {}", .0.display())]
    BaseNotFound(PathBuf),

    #[error("Invalid sidebar '{sidebar}': {reason}")]
    InvalidSidebar { sidebar: String, reason: String },

    #[error("No sidebar manifest configured; set `sidebars` in sitefig.toml")]
    NoSidebars,

    #[error("No docs directory configured; set `docs_dir` in sitefig.toml")]
    NoDocsDir,
}
