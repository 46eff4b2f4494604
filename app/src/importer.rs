//! FILENAME: app/src/importer.rs
// PURPOSE: Open-request handling for the Add Objects importer.
// CONTEXT: A request either reuses the dataset cached for the session or
// reads the configured tables once, expands Objects from Depts, caches the
// result and then hands out a view of the requested table.

use crate::api_types::OpenDataResult;
use crate::error::ImportError;
use crate::records::RecordView;
use crate::settings::ImporterSettings;
use engine::{check_preconditions, expand_objects, materialize_dataset, Dataset, RecordProvider};
use log::{debug, info, warn};
use persistence::{DatasetCache, SessionCache};

/// Session cache key shared by every open request of this importer.
pub const SESSION_KEY: &str = "AddObjectsGridData";

/// Everything the host supplies for one open request.
pub struct OpenContext<'a> {
    /// Table the caller wants to read.
    pub table_name: &'a str,
    pub settings: Option<&'a ImporterSettings>,
    pub records: &'a mut dyn RecordProvider,
    /// `None` when the host has no session cache; every request recomputes.
    pub session_cache: Option<&'a mut dyn SessionCache>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AddObjectsImporter;

impl AddObjectsImporter {
    pub fn new() -> Self {
        AddObjectsImporter
    }

    /// Opens the requested table. Failures come back as a message.
    pub fn open_data(&self, context: OpenContext<'_>) -> OpenDataResult {
        let table_name = context.table_name;
        match self.try_open_data(context) {
            Ok(view) => OpenDataResult::Succeeded(view),
            Err(e) => {
                warn!("open of '{}' failed: {}", table_name, e);
                OpenDataResult::failed(e.to_string())
            }
        }
    }

    pub fn try_open_data(&self, context: OpenContext<'_>) -> Result<RecordView, ImportError> {
        let OpenContext {
            table_name,
            settings,
            records,
            session_cache,
        } = context;

        let mut cache = DatasetCache::new(session_cache, SESSION_KEY);
        let dataset = match cache.load() {
            Some(dataset) => {
                info!("serving '{}' from the session cache", table_name);
                dataset
            }
            None => {
                let dataset = build_dataset(settings, records)?;
                if cache.store(&dataset) {
                    debug!("cached {} tables under '{}'", dataset.len(), cache.key());
                }
                dataset
            }
        };

        Ok(RecordView::new(dataset, table_name)?)
    }

    /// Short description of what the importer is bound to.
    pub fn data_summary(&self, settings: Option<&ImporterSettings>) -> Option<String> {
        let tables = settings?.table_names();
        if tables.is_empty() {
            return None;
        }
        Some(format!("Bound to {} ", tables.join(",")))
    }
}

/// Cache-miss path: read every configured table once, then expand.
fn build_dataset(
    settings: Option<&ImporterSettings>,
    records: &mut dyn RecordProvider,
) -> Result<Dataset, ImportError> {
    let table_names = settings.map(|s| s.table_names()).unwrap_or_default();
    let controls = settings.map(|s| s.control_values()).unwrap_or_default();
    check_preconditions(&table_names, &controls)?;

    info!(
        "materializing {} tables with {} controls",
        table_names.len(),
        controls.len()
    );
    let mut dataset = materialize_dataset(records, &table_names)?;
    expand_objects(&mut dataset, &controls)?;
    Ok(dataset)
}
