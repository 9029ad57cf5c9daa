use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntipiError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "path '{}' does not exist on your system. Make sure it is an absolute path or remove it from settings.json",
        .0.display()
    )]
    DataPathMissing(PathBuf),

    #[error("secure random source unavailable: {0}")]
    Randomness(#[from] rand::Error),

    #[error("failed to lock state directory {path}: {source}")]
    StateLocked {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntipiError>;
