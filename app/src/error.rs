//! FILENAME: app/src/error.rs

use engine::DatasetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Invalid importer settings: {0}")]
    Settings(#[from] serde_json::Error),
}
