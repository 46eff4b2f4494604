//! FILENAME: core/engine/src/materialize.rs
//! PURPOSE: Turns host record sources into in-memory tables.
//! CONTEXT: A record source may stand for a side-effecting query, so it is
//! read exactly once. `materialize_table` takes the source by value and drains
//! it in a single pass; nothing can ask the source for its rows a second time.

use crate::dataset::Dataset;
use crate::error::{DatasetError, SourceError};
use crate::table::{Column, Table};
use crate::value::{ColumnType, Value};
use log::debug;

// ============================================================================
// SOURCE CONTRACT
// ============================================================================

/// Column as declared by the host. `nullable` mirrors a nullable wrapper type
/// and is dropped when the column is materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumn {
    pub name: String,
    pub data_type: ColumnType,
    pub nullable: bool,
}

impl SourceColumn {
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        SourceColumn {
            name: name.into(),
            data_type,
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>, data_type: ColumnType) -> Self {
        SourceColumn {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }
}

/// One record from a source, read by column position.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    values: Vec<Value>,
}

impl SourceRecord {
    pub fn new(values: Vec<Value>) -> Self {
        SourceRecord { values }
    }

    /// Native value at `index`; positions past the end read as null.
    pub fn native_value(&self, index: usize) -> Value {
        self.values.get(index).cloned().unwrap_or(Value::Null)
    }
}

/// The rows of one host table.
pub trait RecordSource {
    fn columns(&self) -> &[SourceColumn];

    /// Next record, `None` once the source is exhausted.
    fn next_record(&mut self) -> Option<Result<SourceRecord, SourceError>>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn columns(&self) -> &[SourceColumn] {
        (**self).columns()
    }

    fn next_record(&mut self) -> Option<Result<SourceRecord, SourceError>> {
        (**self).next_record()
    }
}

/// Host access to local tables by name.
pub trait RecordProvider {
    fn open_table(&mut self, table_name: &str) -> Result<Box<dyn RecordSource>, SourceError>;
}

/// Record source backed by rows already in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    columns: Vec<SourceColumn>,
    records: std::vec::IntoIter<Vec<Value>>,
}

impl MemorySource {
    pub fn new(columns: Vec<SourceColumn>, rows: Vec<Vec<Value>>) -> Self {
        MemorySource {
            columns,
            records: rows.into_iter(),
        }
    }
}

impl RecordSource for MemorySource {
    fn columns(&self) -> &[SourceColumn] {
        &self.columns
    }

    fn next_record(&mut self) -> Option<Result<SourceRecord, SourceError>> {
        self.records.next().map(|values| Ok(SourceRecord::new(values)))
    }
}

// ============================================================================
// MATERIALIZATION
// ============================================================================

/// Copies a source into a new table named `table_name`.
pub fn materialize_table<S: RecordSource>(
    table_name: &str,
    mut source: S,
) -> Result<Table, DatasetError> {
    let columns: Vec<Column> = source
        .columns()
        .iter()
        .map(|c| Column::new(c.name.clone(), c.data_type))
        .collect();
    let width = columns.len();
    let mut table = Table::with_columns(table_name, columns)?;

    while let Some(record) = source.next_record() {
        let record = record.map_err(DatasetError::SourceRead)?;
        let row = (0..width).map(|i| record.native_value(i)).collect();
        table.push_row(row)?;
    }

    debug!(
        "materialized table '{}': {} columns, {} rows",
        table_name,
        width,
        table.row_count()
    );
    Ok(table)
}

/// Opens and materializes each named table once, in order.
pub fn materialize_dataset<P: RecordProvider + ?Sized>(
    provider: &mut P,
    table_names: &[String],
) -> Result<Dataset, DatasetError> {
    let mut dataset = Dataset::new();
    for name in table_names {
        let source = provider
            .open_table(name)
            .map_err(DatasetError::SourceRead)?;
        dataset.add_table(materialize_table(name, source)?)?;
    }
    Ok(dataset)
}
