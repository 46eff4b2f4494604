//! FILENAME: core/engine/src/table.rs
//! PURPOSE: In-memory table: named, typed columns plus positional rows.
//! CONTEXT: Tables are produced by the materializer or by the persisted
//! dataset reader. Rows always carry exactly one value per column, and each
//! value is either null or of its column's type.

use crate::error::DatasetError;
use crate::value::{ColumnType, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// COLUMN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Column {
            name: name.into(),
            data_type,
        }
    }
}

/// A row of values aligned to its table's columns.
pub type Row = Vec<Value>;

// ============================================================================
// TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
    /// Column name -> position, rebuilt whenever columns change.
    positions: HashMap<String, usize>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Builds an empty table with the given schema.
    pub fn with_columns(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = Column>,
    ) -> Result<Self, DatasetError> {
        let mut table = Table::new(name);
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Appends a column. Only allowed while the table has no rows.
    pub fn add_column(&mut self, column: Column) -> Result<(), DatasetError> {
        if !self.rows.is_empty() {
            return Err(DatasetError::Schema(format!(
                "cannot add column '{}' to table '{}' after rows were added",
                column.name, self.name
            )));
        }
        if self.positions.contains_key(&column.name) {
            return Err(DatasetError::Schema(format!(
                "duplicate column '{}' in table '{}'",
                column.name, self.name
            )));
        }
        self.positions.insert(column.name.clone(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Like `column_index`, but a missing column is a schema error.
    pub fn require_column(&self, name: &str) -> Result<usize, DatasetError> {
        self.column_index(name).ok_or_else(|| {
            DatasetError::Schema(format!(
                "column '{}' not found in table '{}'",
                name, self.name
            ))
        })
    }

    /// A row of nulls sized to this table.
    pub fn blank_row(&self) -> Row {
        vec![Value::Null; self.columns.len()]
    }

    /// Appends a row, converting every value to its column's type.
    pub fn push_row(&mut self, row: Row) -> Result<(), DatasetError> {
        if row.len() != self.columns.len() {
            return Err(DatasetError::Schema(format!(
                "row has {} values but table '{}' has {} columns",
                row.len(),
                self.name,
                self.columns.len()
            )));
        }

        let mut converted = Vec::with_capacity(row.len());
        for (value, column) in row.into_iter().zip(&self.columns) {
            let value = value.coerce_to(column.data_type).ok_or_else(|| {
                DatasetError::Schema(format!(
                    "value '{}' does not fit {} column '{}' of table '{}'",
                    value.invariant_string(),
                    column.data_type,
                    column.name,
                    self.name
                ))
            })?;
            converted.push(value);
        }

        self.rows.push(converted);
        Ok(())
    }

    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }
}
