//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the Add Objects importer.
// CONTEXT: Glue between the host (settings, local table records, session
// cache) and the dataset engine. The host calls `open_data` once per table it
// wants to read; only the first call in a session touches the record source.

pub mod api_types;
pub mod definition;
pub mod error;
pub mod importer;
pub mod records;
pub mod settings;

pub use api_types::{ColumnInfo, OpenDataResult};
pub use definition::{AddObjectsImporterDefinition, PropertyDefinition, IMPORTER_ID};
pub use error::ImportError;
pub use importer::{AddObjectsImporter, OpenContext, SESSION_KEY};
pub use records::{RecordRow, RecordView, Records};
pub use settings::{
    name_value_pairs_from_string, name_value_pairs_to_string, ImporterSettings, NameValuePair,
    CONTROLS_PROPERTY, TABLES_PROPERTY,
};
