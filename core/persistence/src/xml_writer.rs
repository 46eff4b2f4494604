//! FILENAME: core/persistence/src/xml_writer.rs

use crate::{
    PersistenceError, COLUMN_TAG, DATASET_TAG, FORMAT_VERSION, NULL_TAG, ROW_TAG, TABLE_TAG,
    VALUE_TAG,
};
use engine::{Dataset, Table, Value};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};

/// Serializes schema and data of every table into one XML document.
pub fn write_dataset_xml(dataset: &Dataset) -> Result<String, PersistenceError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(DATASET_TAG);
    root.push_attribute(("version", FORMAT_VERSION.to_string().as_str()));
    writer.write_event(Event::Start(root))?;

    for table in dataset.tables() {
        write_table(&mut writer, table)?;
    }

    writer.write_event(Event::End(BytesEnd::new(DATASET_TAG)))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

fn write_table<W: Write>(writer: &mut Writer<W>, table: &Table) -> Result<(), PersistenceError> {
    let mut start = BytesStart::new(TABLE_TAG);
    start.push_attribute(("name", table.name()));
    writer.write_event(Event::Start(start))?;

    for column in table.columns() {
        let mut col = BytesStart::new(COLUMN_TAG);
        col.push_attribute(("name", column.name.as_str()));
        col.push_attribute(("type", column.data_type.as_str()));
        writer.write_event(Event::Empty(col))?;
    }

    for row in table.rows() {
        writer.write_event(Event::Start(BytesStart::new(ROW_TAG)))?;
        for value in row {
            write_value(writer, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new(ROW_TAG)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(TABLE_TAG)))?;
    Ok(())
}

fn write_value<W: Write>(writer: &mut Writer<W>, value: &Value) -> Result<(), PersistenceError> {
    if value.is_null() {
        writer.write_event(Event::Empty(BytesStart::new(NULL_TAG)))?;
        return Ok(());
    }

    // Dates are written in ISO form so they parse back exactly.
    let text = value.invariant_string();
    writer.write_event(Event::Start(BytesStart::new(VALUE_TAG)))?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(VALUE_TAG)))?;
    Ok(())
}
