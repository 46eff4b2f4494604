//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for importer integration tests.

#![allow(dead_code)]

use add_objects::{AddObjectsImporter, ImporterSettings, OpenContext, OpenDataResult};
use engine::{
    ColumnType, MemorySource, RecordProvider, RecordSource, SourceColumn, SourceError,
    SourceRecord, Value,
};
use persistence::MemorySessionCache;
use std::collections::HashMap;

// ============================================================================
// RECORD PROVIDER FAKE
// ============================================================================

/// Local tables kept in memory. Counts how often each table is opened.
#[derive(Default)]
pub struct FakeRecords {
    tables: HashMap<String, (Vec<SourceColumn>, Vec<Vec<Value>>)>,
    failing: HashMap<String, String>,
    pub opens: HashMap<String, usize>,
}

impl FakeRecords {
    pub fn add_table(&mut self, name: &str, columns: Vec<SourceColumn>, rows: Vec<Vec<Value>>) {
        self.tables.insert(name.to_string(), (columns, rows));
    }

    /// Makes every read of `name` fail after its columns are declared.
    pub fn fail_reads(&mut self, name: &str, message: &str) {
        self.failing.insert(name.to_string(), message.to_string());
    }

    pub fn open_count(&self, name: &str) -> usize {
        self.opens.get(name).copied().unwrap_or(0)
    }

    pub fn total_opens(&self) -> usize {
        self.opens.values().sum()
    }
}

impl RecordProvider for FakeRecords {
    fn open_table(&mut self, table_name: &str) -> Result<Box<dyn RecordSource>, SourceError> {
        *self.opens.entry(table_name.to_string()).or_insert(0) += 1;
        let (columns, rows) = self
            .tables
            .get(table_name)
            .cloned()
            .ok_or_else(|| format!("local table '{}' does not exist", table_name))?;

        if let Some(message) = self.failing.get(table_name) {
            return Ok(Box::new(FailingSource {
                columns,
                message: message.clone(),
            }));
        }
        Ok(Box::new(MemorySource::new(columns, rows)))
    }
}

struct FailingSource {
    columns: Vec<SourceColumn>,
    message: String,
}

impl RecordSource for FailingSource {
    fn columns(&self) -> &[SourceColumn] {
        &self.columns
    }

    fn next_record(&mut self) -> Option<Result<SourceRecord, SourceError>> {
        Some(Err(self.message.clone().into()))
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn depts_columns() -> Vec<SourceColumn> {
    vec![
        SourceColumn::new("DeptName", ColumnType::String),
        SourceColumn::new("ObjectType", ColumnType::String),
        SourceColumn::nullable("ControlIndex", ColumnType::Integer),
        SourceColumn::new("X", ColumnType::Float),
        SourceColumn::new("Z", ColumnType::Float),
        SourceColumn::new("XOffset", ColumnType::Float),
        SourceColumn::new("ZOffset", ColumnType::Float),
    ]
}

pub fn objects_columns() -> Vec<SourceColumn> {
    vec![
        SourceColumn::new("ObjectName", ColumnType::String),
        SourceColumn::new("ObjectType", ColumnType::String),
        SourceColumn::new("DeptName", ColumnType::String),
        SourceColumn::new("InputNode", ColumnType::String),
        SourceColumn::new("X", ColumnType::String),
        SourceColumn::new("Z", ColumnType::String),
        SourceColumn::nullable("Capacity", ColumnType::Integer),
    ]
}

pub fn dept_row(name: &str, object_type: &str, control: i64, x: f64, z: f64, dx: f64, dz: f64) -> Vec<Value> {
    vec![
        Value::text(name),
        Value::text(object_type),
        Value::Integer(control),
        Value::Float(x),
        Value::Float(z),
        Value::Float(dx),
        Value::Float(dz),
    ]
}

pub fn settings(tables: &str, controls: &str) -> ImporterSettings {
    ImporterSettings::new()
        .with_property("Tables", tables)
        .with_property("Controls", controls)
}

// ============================================================================
// HARNESS
// ============================================================================

pub struct TestHarness {
    pub importer: AddObjectsImporter,
    pub records: FakeRecords,
    pub cache: MemorySessionCache,
    pub settings: ImporterSettings,
}

impl TestHarness {
    /// Empty Depts and Objects tables, configured with one control.
    pub fn new() -> Self {
        let mut records = FakeRecords::default();
        records.add_table("Depts", depts_columns(), vec![]);
        records.add_table("Objects", objects_columns(), vec![]);
        TestHarness {
            importer: AddObjectsImporter::new(),
            records,
            cache: MemorySessionCache::new(),
            settings: settings("Source=Depts;Target=Objects", "Servers=3"),
        }
    }

    /// The single-department example: Assembly / Server, three servers.
    pub fn worked_example() -> Self {
        let mut harness = Self::new();
        harness.set_depts(vec![dept_row("Assembly", "Server", 0, 10.0, 5.0, 2.0, 0.0)]);
        harness
    }

    pub fn set_depts(&mut self, rows: Vec<Vec<Value>>) {
        self.records.add_table("Depts", depts_columns(), rows);
    }

    pub fn open(&mut self, table_name: &str) -> OpenDataResult {
        let context = OpenContext {
            table_name,
            settings: Some(&self.settings),
            records: &mut self.records,
            session_cache: Some(&mut self.cache),
        };
        self.importer.open_data(context)
    }

    pub fn open_without_cache(&mut self, table_name: &str) -> OpenDataResult {
        let context = OpenContext {
            table_name,
            settings: Some(&self.settings),
            records: &mut self.records,
            session_cache: None,
        };
        self.importer.open_data(context)
    }

    /// Opens `table_name` and returns its formatted rows, panicking on failure.
    pub fn rows(&mut self, table_name: &str) -> Vec<Vec<String>> {
        let view = self
            .open(table_name)
            .into_result()
            .unwrap_or_else(|message| panic!("open of {} failed: {}", table_name, message));
        view.records().map(|r| r.to_strings()).collect()
    }
}

/// Values of one column across formatted rows.
pub fn column(rows: &[Vec<String>], index: usize) -> Vec<String> {
    rows.iter().map(|r| r[index].clone()).collect()
}
