//! FILENAME: core/engine/src/expansion.rs
//! PURPOSE: Regenerates the Objects table from the Depts table.
//! CONTEXT: Each department row is repeated `numServers` times, where the
//! count comes from the ordered control values at the row's `ControlIndex`
//! position. Generated rows get a numbered name, an input node label and
//! coordinates stepped by the department's offsets.

use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::table::{Row, Table};
use crate::value::{format_float_display, Value};
use log::info;

pub const DEPTS_TABLE: &str = "Depts";
pub const OBJECTS_TABLE: &str = "Objects";

/// Prefix of every generated `InputNode` label.
pub const INPUT_NODE_PREFIX: &str = "Input@";

pub const NO_TABLES_MESSAGE: &str = "No tables have been defined.";
pub const NO_CONTROLS_MESSAGE: &str = "No Controls have been defined.";

// ============================================================================
// PRECONDITIONS
// ============================================================================

/// Configuration checks that must pass before any table is read.
pub fn check_preconditions(table_names: &[String], controls: &[String]) -> Result<(), DatasetError> {
    if table_names.is_empty() {
        return Err(DatasetError::Configuration(NO_TABLES_MESSAGE.to_string()));
    }
    if controls.is_empty() {
        return Err(DatasetError::Configuration(NO_CONTROLS_MESSAGE.to_string()));
    }
    Ok(())
}

// ============================================================================
// LAYOUTS
// ============================================================================

/// Column positions in Depts, resolved once per expansion.
#[derive(Debug, Clone, Copy)]
struct DeptsLayout {
    dept_name: usize,
    object_type: usize,
    control_index: usize,
    x: usize,
    z: usize,
    x_offset: usize,
    z_offset: usize,
}

impl DeptsLayout {
    fn resolve(table: &Table) -> Result<Self, DatasetError> {
        Ok(DeptsLayout {
            dept_name: table.require_column("DeptName")?,
            object_type: table.require_column("ObjectType")?,
            control_index: table.require_column("ControlIndex")?,
            x: table.require_column("X")?,
            z: table.require_column("Z")?,
            x_offset: table.require_column("XOffset")?,
            z_offset: table.require_column("ZOffset")?,
        })
    }
}

/// Column positions in Objects, resolved once per expansion.
#[derive(Debug, Clone, Copy)]
struct ObjectsLayout {
    width: usize,
    object_name: usize,
    object_type: usize,
    dept_name: usize,
    input_node: usize,
    x: usize,
    z: usize,
}

impl ObjectsLayout {
    fn resolve(table: &Table) -> Result<Self, DatasetError> {
        Ok(ObjectsLayout {
            width: table.columns().len(),
            object_name: table.require_column("ObjectName")?,
            object_type: table.require_column("ObjectType")?,
            dept_name: table.require_column("DeptName")?,
            input_node: table.require_column("InputNode")?,
            x: table.require_column("X")?,
            z: table.require_column("Z")?,
        })
    }
}

// ============================================================================
// EXPANSION
// ============================================================================

/// Counts reported after an expansion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionSummary {
    pub departments: usize,
    pub objects: usize,
}

/// Clears Objects and refills it from Depts and the ordered control values.
///
/// Callers run `check_preconditions` first. With no controls, any Depts row
/// fails its `ControlIndex` lookup.
pub fn expand_objects(dataset: &mut Dataset, controls: &[String]) -> Result<ExpansionSummary, DatasetError> {
    let depts = dataset
        .table(DEPTS_TABLE)
        .ok_or_else(|| DatasetError::table_not_found(DEPTS_TABLE))?;
    let objects = dataset
        .table(OBJECTS_TABLE)
        .ok_or_else(|| DatasetError::table_not_found(OBJECTS_TABLE))?;

    let dept_layout = DeptsLayout::resolve(depts)?;
    let object_layout = ObjectsLayout::resolve(objects)?;

    let mut generated = Vec::new();
    for (position, dept) in depts.rows().iter().enumerate() {
        expand_department(dept, position, &dept_layout, &object_layout, controls, &mut generated)?;
    }
    let departments = depts.row_count();

    let objects = dataset
        .table_mut(OBJECTS_TABLE)
        .ok_or_else(|| DatasetError::table_not_found(OBJECTS_TABLE))?;
    objects.clear_rows();
    let count = generated.len();
    for row in generated {
        objects.push_row(row)?;
    }

    info!("expanded {} departments into {} objects", departments, count);
    Ok(ExpansionSummary {
        departments,
        objects: count,
    })
}

fn expand_department(
    dept: &Row,
    position: usize,
    dl: &DeptsLayout,
    ol: &ObjectsLayout,
    controls: &[String],
    out: &mut Vec<Row>,
) -> Result<(), DatasetError> {
    let num_servers = server_count(dept, position, dl, controls)?;

    let object_type = &dept[dl.object_type];
    let base_name = object_type.invariant_string();
    let x_base = numeric_field(dept, dl.x, "X", position)?;
    let z_base = numeric_field(dept, dl.z, "Z", position)?;
    let x_offset = numeric_field(dept, dl.x_offset, "XOffset", position)?;
    let z_offset = numeric_field(dept, dl.z_offset, "ZOffset", position)?;

    for i in 1..=num_servers {
        let step = i as f64;
        let object_name = format!("{}{}", base_name, i);

        let mut row = vec![Value::Null; ol.width];
        row[ol.input_node] = Value::String(format!("{}{}", INPUT_NODE_PREFIX, object_name));
        row[ol.object_name] = Value::String(object_name);
        row[ol.object_type] = object_type.clone();
        row[ol.dept_name] = dept[dl.dept_name].clone();
        row[ol.x] = Value::String(format_float_display(step * x_offset + x_base));
        row[ol.z] = Value::String(format_float_display(step * z_offset + z_base));
        out.push(row);
    }
    Ok(())
}

/// Looks up the repetition count by position, not by control name.
/// Counts must fit a 32-bit signed integer.
fn server_count(
    dept: &Row,
    position: usize,
    dl: &DeptsLayout,
    controls: &[String],
) -> Result<i32, DatasetError> {
    let raw_index = &dept[dl.control_index];
    let index = raw_index.to_i64().ok_or_else(|| {
        DatasetError::Configuration(format!(
            "Depts row {}: ControlIndex '{}' is not a whole number",
            position,
            raw_index.invariant_string()
        ))
    })?;

    let control = usize::try_from(index)
        .ok()
        .and_then(|i| controls.get(i))
        .ok_or_else(|| {
            DatasetError::Configuration(format!(
                "Depts row {}: ControlIndex {} is outside the {} defined controls",
                position,
                index,
                controls.len()
            ))
        })?;

    let count = Value::text(control.as_str()).to_i64().ok_or_else(|| {
        DatasetError::Configuration(format!(
            "control value '{}' at position {} is not a whole number",
            control, index
        ))
    })?;

    i32::try_from(count).map_err(|_| {
        DatasetError::Configuration(format!(
            "control value '{}' at position {} is outside the 32-bit integer range",
            control, index
        ))
    })
}

fn numeric_field(dept: &Row, index: usize, column: &str, position: usize) -> Result<f64, DatasetError> {
    dept[index].to_f64().ok_or_else(|| {
        DatasetError::Configuration(format!(
            "Depts row {}: {} value '{}' is not numeric",
            position,
            column,
            dept[index].invariant_string()
        ))
    })
}
