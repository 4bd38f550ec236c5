use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AquaError {
    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: missing required column '{column}'")]
    MissingColumn { column: String, path: PathBuf },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AquaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AquaError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AquaError>;
