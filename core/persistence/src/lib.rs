//! FILENAME: core/persistence/src/lib.rs
//! Dataset Persistence Module
//!
//! Serializes a whole dataset (schema and data of every table) to a
//! self-describing XML document and keeps it in a session-scoped cache.
//!
//! Document layout:
//!
//! ```text
//! <dataset version="1">
//!   <table name="Depts">
//!     <column name="DeptName" type="string"/>
//!     <row><v>Assembly</v><null/></row>
//!   </table>
//! </dataset>
//! ```
//!
//! The writer emits no indentation, so every character inside `<v>` belongs
//! to the value.

mod cache;
mod error;
mod xml_reader;
mod xml_writer;

pub use cache::{DatasetCache, MemorySessionCache, SessionCache};
pub use error::PersistenceError;
pub use xml_reader::read_dataset_xml;
pub use xml_writer::write_dataset_xml;

// ============================================================================
// FORMAT
// ============================================================================

/// Bumped whenever the document layout changes; older payloads are rejected.
pub const FORMAT_VERSION: u32 = 1;

pub(crate) const DATASET_TAG: &str = "dataset";
pub(crate) const TABLE_TAG: &str = "table";
pub(crate) const COLUMN_TAG: &str = "column";
pub(crate) const ROW_TAG: &str = "row";
pub(crate) const VALUE_TAG: &str = "v";
pub(crate) const NULL_TAG: &str = "null";

#[cfg(test)]
mod tests;
