//! FILENAME: app/src/records.rs
// PURPOSE: Read-only view of one table, formatted for the host.
// CONTEXT: The view owns the dataset it was opened on. Every cell is handed
// out as text: dates in the calendar layout, everything else invariant.

use crate::api_types::ColumnInfo;
use engine::{Dataset, DatasetError, Row};

pub struct RecordView {
    dataset: Dataset,
    table_name: String,
    columns: Vec<ColumnInfo>,
}

impl RecordView {
    /// Wraps `table_name` of `dataset`. An empty dataset gives an empty view;
    /// a non-empty dataset must contain the table.
    pub fn new(dataset: Dataset, table_name: &str) -> Result<Self, DatasetError> {
        let columns = if dataset.is_empty() {
            Vec::new()
        } else {
            dataset
                .table(table_name)
                .ok_or_else(|| DatasetError::table_not_found(table_name))?
                .columns()
                .iter()
                .map(ColumnInfo::from)
                .collect()
        };

        Ok(RecordView {
            dataset,
            table_name: table_name.to_string(),
            columns,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    /// Fresh pass over the rows; call again to restart.
    pub fn records(&self) -> Records<'_> {
        let rows: &[Row] = self
            .dataset
            .table(&self.table_name)
            .map(|t| t.rows())
            .unwrap_or(&[]);
        Records { rows: rows.iter() }
    }

    pub fn row_count(&self) -> usize {
        self.records().len()
    }
}

impl std::fmt::Debug for RecordView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordView")
            .field("table_name", &self.table_name)
            .field("columns", &self.columns)
            .field("rows", &self.row_count())
            .finish()
    }
}

impl<'a> IntoIterator for &'a RecordView {
    type Item = RecordRow<'a>;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}

pub struct Records<'a> {
    rows: std::slice::Iter<'a, Row>,
}

impl<'a> Iterator for Records<'a> {
    type Item = RecordRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|row| RecordRow { row })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

/// One row of a record view, read by column position.
#[derive(Debug, Clone, Copy)]
pub struct RecordRow<'a> {
    row: &'a Row,
}

impl RecordRow<'_> {
    pub fn get(&self, index: usize) -> Option<String> {
        self.row.get(index).map(|value| value.display_string())
    }

    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.row.iter().map(|value| value.display_string()).collect()
    }
}
