//! FILENAME: app/src/api_types.rs
// PURPOSE: Types handed back to the host from an open request.

use crate::records::RecordView;
use engine::{Column, ColumnType};
use serde::{Deserialize, Serialize};

/// Column descriptor exposed by a record view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: ColumnType,
}

impl From<&Column> for ColumnInfo {
    fn from(column: &Column) -> Self {
        ColumnInfo {
            name: column.name.clone(),
            data_type: column.data_type,
        }
    }
}

/// Outcome of an open request.
#[derive(Debug)]
pub enum OpenDataResult {
    Succeeded(RecordView),
    Failed { message: String },
}

impl OpenDataResult {
    pub fn failed(message: impl Into<String>) -> Self {
        OpenDataResult::Failed {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OpenDataResult::Succeeded(_))
    }

    /// Failure message, `None` on success.
    pub fn message(&self) -> Option<&str> {
        match self {
            OpenDataResult::Succeeded(_) => None,
            OpenDataResult::Failed { message } => Some(message),
        }
    }

    pub fn records(&self) -> Option<&RecordView> {
        match self {
            OpenDataResult::Succeeded(view) => Some(view),
            OpenDataResult::Failed { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<RecordView, String> {
        match self {
            OpenDataResult::Succeeded(view) => Ok(view),
            OpenDataResult::Failed { message } => Err(message),
        }
    }
}
