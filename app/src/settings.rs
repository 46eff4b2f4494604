//! FILENAME: app/src/settings.rs
// PURPOSE: Importer settings as handed over by the host.
// CONTEXT: The host stores every property as text. `Tables` and `Controls`
// hold name/value pair lists; only the values are used, in order.

use crate::error::ImportError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TABLES_PROPERTY: &str = "Tables";
pub const CONTROLS_PROPERTY: &str = "Controls";

/// One `name=value` entry of a pair-list property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValuePair {
    pub name: String,
    pub value: String,
}

impl NameValuePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        NameValuePair {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parses pair-list text.
///
/// Entries are separated by `;` or line breaks and split at the first `=`.
/// An entry without `=` uses its text as both name and value. Blank entries
/// are skipped and order is preserved.
pub fn name_value_pairs_from_string(text: &str) -> Vec<NameValuePair> {
    text.split(|c| c == ';' || c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((name, value)) => NameValuePair::new(name.trim(), value.trim()),
            None => NameValuePair::new(entry, entry),
        })
        .collect()
}

/// Inverse of `name_value_pairs_from_string` for well-formed pairs.
pub fn name_value_pairs_to_string(pairs: &[NameValuePair]) -> String {
    pairs
        .iter()
        .map(|p| format!("{}={}", p.name, p.value))
        .collect::<Vec<_>>()
        .join(";")
}

/// Property bag for one importer instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterSettings {
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl ImporterSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn with_property(mut self, name: &str, value: impl Into<String>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn pairs(&self, name: &str) -> Vec<NameValuePair> {
        self.property(name)
            .map(name_value_pairs_from_string)
            .unwrap_or_default()
    }

    /// Source table identifiers to materialize, in order.
    pub fn table_names(&self) -> Vec<String> {
        self.pairs(TABLES_PROPERTY).into_iter().map(|p| p.value).collect()
    }

    /// Control values, in order. Lookup into this list is positional.
    pub fn control_values(&self) -> Vec<String> {
        self.pairs(CONTROLS_PROPERTY).into_iter().map(|p| p.value).collect()
    }
}
