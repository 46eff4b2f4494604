//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

/// Failure raised by a record source while it is being read.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Schema(String),

    #[error("{0}")]
    SourceRead(#[source] SourceError),
}

impl DatasetError {
    pub fn table_not_found(name: &str) -> Self {
        DatasetError::Schema(format!("table '{}' not found", name))
    }
}
