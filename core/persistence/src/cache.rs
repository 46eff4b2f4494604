//! FILENAME: core/persistence/src/cache.rs
//! PURPOSE: Session-scoped storage of a serialized dataset.
//! CONTEXT: The host owns the session store and hands it in per request; the
//! dataset cache only decides what text goes in and how it comes back out.
//! A missing store means every request recomputes.

use crate::{read_dataset_xml, write_dataset_xml};
use engine::Dataset;
use log::{debug, warn};
use std::collections::HashMap;

/// Keyed text store that lives as long as one editing session.
pub trait SessionCache {
    fn get_named_value(&self, key: &str) -> Option<String>;
    fn set_named_value(&mut self, key: &str, value: String);
}

/// In-process session store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionCache {
    values: HashMap<String, String>,
}

impl MemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionCache for MemorySessionCache {
    fn get_named_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_named_value(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

// ============================================================================
// DATASET CACHE
// ============================================================================

/// One cached dataset under a fixed key.
pub struct DatasetCache<'a> {
    store: Option<&'a mut dyn SessionCache>,
    key: &'a str,
}

impl<'a> DatasetCache<'a> {
    pub fn new(store: Option<&'a mut dyn SessionCache>, key: &'a str) -> Self {
        DatasetCache { store, key }
    }

    pub fn key(&self) -> &str {
        self.key
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Raw cached text; empty payloads count as absent.
    pub fn get(&self) -> Option<String> {
        self.store
            .as_ref()
            .and_then(|store| store.get_named_value(self.key))
            .filter(|text| !text.is_empty())
    }

    pub fn put(&mut self, text: String) {
        if let Some(store) = self.store.as_mut() {
            store.set_named_value(self.key, text);
        }
    }

    /// Cached dataset, if present and readable. Unreadable text is a miss.
    pub fn load(&self) -> Option<Dataset> {
        let text = self.get()?;
        match read_dataset_xml(&text) {
            Ok(dataset) => {
                debug!("session cache '{}' hit: {} tables", self.key, dataset.len());
                Some(dataset)
            }
            Err(e) => {
                warn!("session cache '{}' holds an unreadable dataset: {}", self.key, e);
                None
            }
        }
    }

    /// Stores a full snapshot of `dataset`. Returns whether anything was written.
    pub fn store(&mut self, dataset: &Dataset) -> bool {
        if !self.is_available() {
            return false;
        }
        match write_dataset_xml(dataset) {
            Ok(text) => {
                self.put(text);
                true
            }
            Err(e) => {
                warn!("could not serialize dataset for session cache '{}': {}", self.key, e);
                false
            }
        }
    }
}
