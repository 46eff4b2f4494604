//! FILENAME: core/persistence/src/xml_reader.rs

use crate::{
    PersistenceError, COLUMN_TAG, DATASET_TAG, FORMAT_VERSION, NULL_TAG, ROW_TAG, TABLE_TAG,
    VALUE_TAG,
};
use engine::{Column, ColumnType, Dataset, Row, Table, Value};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Rebuilds a dataset from the text produced by `write_dataset_xml`.
pub fn read_dataset_xml(xml: &str) -> Result<Dataset, PersistenceError> {
    // Whitespace is significant inside values, so text is not trimmed.
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut dataset = Dataset::new();
    let mut root_open = false;
    let mut root_closed = false;
    let mut table: Option<Table> = None;
    let mut row: Option<Row> = None;
    let mut text: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"dataset" => {
                    check_version(&e)?;
                    root_open = true;
                }
                b"table" => table = Some(Table::new(required_attribute(&e, "name")?)),
                b"row" => row = Some(open_row(&table)?),
                b"v" => {
                    if row.is_none() {
                        return Err(misplaced(VALUE_TAG));
                    }
                    text = Some(String::new());
                }
                other => return Err(unexpected(other)),
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"dataset" => {
                    check_version(&e)?;
                    root_open = true;
                    root_closed = true;
                }
                b"table" => dataset.add_table(Table::new(required_attribute(&e, "name")?))?,
                b"column" => {
                    let current = table.as_mut().ok_or_else(|| misplaced(COLUMN_TAG))?;
                    current.add_column(read_column(&e)?)?;
                }
                b"row" => {
                    let empty = open_row(&table)?;
                    close_row(&mut table, empty)?;
                }
                b"null" => row.as_mut().ok_or_else(|| misplaced(NULL_TAG))?.push(Value::Null),
                b"v" => {
                    let value = typed_value(&table, &row, String::new())?;
                    row.as_mut().ok_or_else(|| misplaced(VALUE_TAG))?.push(value);
                }
                other => return Err(unexpected(other)),
            },
            Event::Text(t) => {
                if let Some(current) = text.as_mut() {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" => {
                    let raw = text.take().ok_or_else(|| misplaced(VALUE_TAG))?;
                    let value = typed_value(&table, &row, raw)?;
                    row.as_mut().ok_or_else(|| misplaced(VALUE_TAG))?.push(value);
                }
                b"row" => {
                    let finished = row.take().ok_or_else(|| misplaced(ROW_TAG))?;
                    close_row(&mut table, finished)?;
                }
                b"table" => {
                    let finished = table.take().ok_or_else(|| misplaced(TABLE_TAG))?;
                    dataset.add_table(finished)?;
                }
                b"dataset" => root_closed = true,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !root_open {
        return Err(PersistenceError::InvalidFormat(format!(
            "missing <{}> root element",
            DATASET_TAG
        )));
    }
    if !root_closed || table.is_some() || row.is_some() {
        return Err(PersistenceError::InvalidFormat(
            "document ends inside an open element".to_string(),
        ));
    }
    Ok(dataset)
}

fn check_version(e: &BytesStart<'_>) -> Result<(), PersistenceError> {
    let version = required_attribute(e, "version")?;
    if version.trim().parse::<u32>().ok() != Some(FORMAT_VERSION) {
        return Err(PersistenceError::InvalidFormat(format!(
            "unsupported dataset format version '{}'",
            version
        )));
    }
    Ok(())
}

fn read_column(e: &BytesStart<'_>) -> Result<Column, PersistenceError> {
    let name = required_attribute(e, "name")?;
    let type_name = required_attribute(e, "type")?;
    let data_type = ColumnType::parse(&type_name).ok_or_else(|| {
        PersistenceError::InvalidFormat(format!(
            "column '{}' has unknown type '{}'",
            name, type_name
        ))
    })?;
    Ok(Column::new(name, data_type))
}

fn open_row(table: &Option<Table>) -> Result<Row, PersistenceError> {
    let current = table.as_ref().ok_or_else(|| misplaced(ROW_TAG))?;
    Ok(Vec::with_capacity(current.columns().len()))
}

fn close_row(table: &mut Option<Table>, row: Row) -> Result<(), PersistenceError> {
    let current = table.as_mut().ok_or_else(|| misplaced(ROW_TAG))?;
    current.push_row(row)?;
    Ok(())
}

/// Parses `raw` with the type of the column the next value lands in.
fn typed_value(table: &Option<Table>, row: &Option<Row>, raw: String) -> Result<Value, PersistenceError> {
    let current = table.as_ref().ok_or_else(|| misplaced(VALUE_TAG))?;
    let position = row.as_ref().ok_or_else(|| misplaced(VALUE_TAG))?.len();
    let column = current.columns().get(position).ok_or_else(|| {
        PersistenceError::InvalidFormat(format!(
            "row in table '{}' has more values than columns",
            current.name()
        ))
    })?;

    Value::String(raw).coerce_to(column.data_type).ok_or_else(|| {
        PersistenceError::InvalidFormat(format!(
            "value in column '{}' of table '{}' is not a valid {}",
            column.name,
            current.name(),
            column.data_type
        ))
    })
}

fn required_attribute(e: &BytesStart<'_>, key: &str) -> Result<String, PersistenceError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(PersistenceError::InvalidFormat(format!(
        "<{}> is missing the '{}' attribute",
        String::from_utf8_lossy(e.local_name().as_ref()),
        key
    )))
}

fn misplaced(tag: &str) -> PersistenceError {
    PersistenceError::InvalidFormat(format!("<{}> is not allowed here", tag))
}

fn unexpected(name: &[u8]) -> PersistenceError {
    PersistenceError::InvalidFormat(format!(
        "unexpected element <{}>",
        String::from_utf8_lossy(name)
    ))
}
