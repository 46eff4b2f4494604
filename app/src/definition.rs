//! FILENAME: app/src/definition.rs
// PURPOSE: Registration metadata for the importer.
// CONTEXT: The host lists importers by name and id and builds its settings
// form from the property definitions below.

use crate::importer::AddObjectsImporter;
use crate::settings::{CONTROLS_PROPERTY, TABLES_PROPERTY};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of the importer across host sessions.
pub const IMPORTER_ID: Uuid = Uuid::from_u128(0xf137d316_86b1_405e_9b80_8e460b51afe5);

/// A name/value pair-list property shown in the importer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub default_value: String,
}

impl PropertyDefinition {
    fn name_value_pairs(name: &str, description: &str) -> Self {
        PropertyDefinition {
            name: name.to_string(),
            display_name: name.to_string(),
            description: description.to_string(),
            default_value: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AddObjectsImporterDefinition;

impl AddObjectsImporterDefinition {
    pub fn name(&self) -> &'static str {
        "Add Objects"
    }

    pub fn description(&self) -> &'static str {
        "Add Objects Transformer"
    }

    pub fn unique_id(&self) -> Uuid {
        IMPORTER_ID
    }

    pub fn define_schema(&self) -> Vec<PropertyDefinition> {
        vec![
            PropertyDefinition::name_value_pairs(TABLES_PROPERTY, "Tables."),
            PropertyDefinition::name_value_pairs(CONTROLS_PROPERTY, "Controls."),
        ]
    }

    pub fn create_instance(&self) -> AddObjectsImporter {
        AddObjectsImporter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_stable() {
        let def = AddObjectsImporterDefinition;
        assert_eq!(def.name(), "Add Objects");
        assert_eq!(
            def.unique_id().to_string(),
            "f137d316-86b1-405e-9b80-8e460b51afe5"
        );
    }

    #[test]
    fn schema_declares_tables_then_controls() {
        let props = AddObjectsImporterDefinition.define_schema();
        let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Tables", "Controls"]);
        assert!(props.iter().all(|p| p.default_value.is_empty()));
    }
}
