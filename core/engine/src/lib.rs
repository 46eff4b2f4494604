//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the dataset engine.
//! CONTEXT: Typed values and tables, the one-pass table materializer and the
//! Depts -> Objects expansion. Re-exports the types other crates use.

pub mod dataset;
pub mod error;
pub mod expansion;
pub mod materialize;
pub mod table;
pub mod value;

// Re-export commonly used types at the crate root
pub use dataset::Dataset;
pub use error::{DatasetError, SourceError};
pub use expansion::{
    check_preconditions, expand_objects, ExpansionSummary, DEPTS_TABLE, INPUT_NODE_PREFIX,
    NO_CONTROLS_MESSAGE, NO_TABLES_MESSAGE, OBJECTS_TABLE,
};
pub use materialize::{
    materialize_dataset, materialize_table, MemorySource, RecordProvider, RecordSource,
    SourceColumn, SourceRecord,
};
pub use table::{Column, Row, Table};
pub use value::{ColumnType, Value};
