//! FILENAME: core/persistence/src/error.rs

use engine::DatasetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid dataset format: {0}")]
    InvalidFormat(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}
