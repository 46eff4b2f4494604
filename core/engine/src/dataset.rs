//! FILENAME: core/engine/src/dataset.rs
//! PURPOSE: Ordered collection of uniquely named tables for one open request.

use crate::error::DatasetError;
use crate::table::Table;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Insertion order is discovery order and is preserved by persistence.
    tables: Vec<Table>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, table: Table) -> Result<(), DatasetError> {
        if self.contains(table.name()) {
            return Err(DatasetError::Schema(format!(
                "table '{}' is already part of the dataset",
                table.name()
            )));
        }
        self.tables.push(table);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t.name() == name)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name() == name)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_discovery_order() {
        let mut dataset = Dataset::new();
        dataset.add_table(Table::new("Objects")).unwrap();
        dataset.add_table(Table::new("Depts")).unwrap();
        let names: Vec<&str> = dataset.table_names().collect();
        assert_eq!(names, vec!["Objects", "Depts"]);
    }

    #[test]
    fn rejects_duplicate_table_names() {
        let mut dataset = Dataset::new();
        dataset.add_table(Table::new("Depts")).unwrap();
        assert!(dataset.add_table(Table::new("Depts")).is_err());
        assert_eq!(dataset.len(), 1);
    }
}
