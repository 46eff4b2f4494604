//! FILENAME: core/persistence/src/tests.rs
//! PURPOSE: Unit tests for the dataset XML format and the session cache.

use crate::{
    read_dataset_xml, write_dataset_xml, DatasetCache, MemorySessionCache, PersistenceError,
    SessionCache,
};
use chrono::NaiveDate;
use engine::{Column, ColumnType, Dataset, Table, Value};

fn sample_dataset() -> Dataset {
    let mut depts = Table::with_columns(
        "Depts",
        [
            Column::new("DeptName", ColumnType::String),
            Column::new("ControlIndex", ColumnType::Integer),
            Column::new("X", ColumnType::Float),
            Column::new("Opened", ColumnType::DateTime),
        ],
    )
    .unwrap();
    let opened = NaiveDate::from_ymd_opt(2023, 11, 2)
        .unwrap()
        .and_hms_milli_opt(8, 30, 0, 250)
        .unwrap();
    depts
        .push_row(vec![
            Value::text("Assembly & <Test>"),
            Value::Integer(0),
            Value::Float(10.25),
            Value::DateTime(opened),
        ])
        .unwrap();
    depts
        .push_row(vec![
            Value::text("  padded  "),
            Value::Null,
            Value::Float(-0.1),
            Value::Null,
        ])
        .unwrap();
    depts
        .push_row(vec![Value::text(""), Value::Integer(-7), Value::Null, Value::Null])
        .unwrap();

    let objects = Table::with_columns(
        "Objects",
        [
            Column::new("ObjectName", ColumnType::String),
            Column::new("X", ColumnType::String),
        ],
    )
    .unwrap();

    let mut dataset = Dataset::new();
    dataset.add_table(depts).unwrap();
    dataset.add_table(objects).unwrap();
    dataset
}

// ========================================
// XML FORMAT
// ========================================

#[test]
fn round_trip_preserves_schema_and_values() {
    let dataset = sample_dataset();
    let xml = write_dataset_xml(&dataset).unwrap();
    let restored = read_dataset_xml(&xml).unwrap();
    assert_eq!(restored, dataset);
}

#[test]
fn null_and_empty_string_stay_distinct() {
    let xml = write_dataset_xml(&sample_dataset()).unwrap();
    let restored = read_dataset_xml(&xml).unwrap();
    let depts = restored.table("Depts").unwrap();
    assert_eq!(depts.rows()[2][0], Value::text(""));
    assert_eq!(depts.rows()[1][1], Value::Null);
}

#[test]
fn writer_escapes_markup_in_values() {
    let xml = write_dataset_xml(&sample_dataset()).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<v>Assembly &amp; &lt;Test&gt;</v>"));
    assert!(xml.contains("<column name=\"ControlIndex\" type=\"integer\"/>"));
    assert!(xml.contains("<table name=\"Objects\">"));
}

#[test]
fn empty_dataset_round_trips() {
    let xml = write_dataset_xml(&Dataset::new()).unwrap();
    assert!(read_dataset_xml(&xml).unwrap().is_empty());
}

#[test]
fn rejects_unknown_version() {
    let err = read_dataset_xml(r#"<dataset version="9"></dataset>"#).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidFormat(_)));
}

#[test]
fn rejects_values_that_do_not_fit_their_column() {
    let xml = r#"<dataset version="1"><table name="T"><column name="N" type="integer"/><row><v>abc</v></row></table></dataset>"#;
    let err = read_dataset_xml(xml).unwrap_err();
    assert!(err.to_string().contains("not a valid integer"));
}

#[test]
fn rejects_rows_with_missing_values() {
    let xml = r#"<dataset version="1"><table name="T"><column name="A" type="string"/><column name="B" type="string"/><row><v>a</v></row></table></dataset>"#;
    assert!(matches!(read_dataset_xml(xml), Err(PersistenceError::Dataset(_))));
}

#[test]
fn rejects_truncated_documents() {
    let xml = r#"<dataset version="1"><table name="T"><column name="A" type="string"/>"#;
    assert!(read_dataset_xml(xml).is_err());
    assert!(read_dataset_xml("not xml at all").is_err());
}

// ========================================
// SESSION CACHE
// ========================================

#[test]
fn cache_stores_and_loads_dataset() {
    let mut store = MemorySessionCache::new();
    let dataset = sample_dataset();

    {
        let mut cache = DatasetCache::new(Some(&mut store), "AddObjectsGridData");
        assert!(cache.load().is_none());
        assert!(cache.store(&dataset));
    }
    assert_eq!(store.len(), 1);

    let cache = DatasetCache::new(Some(&mut store), "AddObjectsGridData");
    assert_eq!(cache.load(), Some(dataset));
}

#[test]
fn cache_without_store_is_always_a_miss() {
    let mut cache = DatasetCache::new(None, "AddObjectsGridData");
    assert!(!cache.is_available());
    assert!(!cache.store(&sample_dataset()));
    assert!(cache.load().is_none());
}

#[test]
fn unreadable_payload_is_a_miss() {
    let mut store = MemorySessionCache::new();
    store.set_named_value("AddObjectsGridData", "<dataset".to_string());
    let cache = DatasetCache::new(Some(&mut store), "AddObjectsGridData");
    assert!(cache.get().is_some());
    assert!(cache.load().is_none());
}

#[test]
fn empty_payload_counts_as_absent() {
    let mut store = MemorySessionCache::new();
    store.set_named_value("AddObjectsGridData", String::new());
    let cache = DatasetCache::new(Some(&mut store), "AddObjectsGridData");
    assert!(cache.get().is_none());
}
