//! Deterministic CSV serialization, one output file per measurement.
//!
//! The header is `name,time` followed by the measurement's tag keys and then
//! its field keys, each segment sorted ascending. Column order therefore
//! depends only on the schema, never on the order keys first appeared in the
//! log. Rows are sorted by the timestamp column before writing; ISO-8601 UTC
//! strings at second precision sort chronologically under plain string
//! comparison.

use std::path::{Path, PathBuf};

use crate::error::{EmitError, Result};
use crate::record::Record;
use crate::schema::MeasurementSchema;

/// Outcome of emitting one measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// A CSV file was written.
    Written {
        /// Path of the file written.
        path: PathBuf,
        /// Number of data rows (excluding the header).
        rows: usize,
    },
    /// No qualifying rows; nothing was written.
    Empty {
        /// The measurement that had no data.
        measurement: String,
    },
}

/// Builds the CSV header for one measurement.
pub fn header(schema: &MeasurementSchema) -> Vec<String> {
    let mut header = Vec::with_capacity(2 + schema.tag_keys.len() + schema.field_keys.len());
    header.push("name".to_string());
    header.push("time".to_string());
    header.extend(schema.tag_keys.iter().cloned());
    header.extend(schema.field_keys.iter().cloned());
    header
}

/// Projects a record into an output row using the schema's key order.
///
/// A key present in the schema but absent from the record yields an empty
/// cell; another record of the same measurement introduced that column.
fn project(record: &Record, schema: &MeasurementSchema) -> Vec<String> {
    let mut row = Vec::with_capacity(2 + schema.tag_keys.len() + schema.field_keys.len());
    row.push(record.measurement.clone());
    row.push(record.iso_time());
    for key in &schema.tag_keys {
        row.push(record.tags.get(key).cloned().unwrap_or_default());
    }
    for key in &schema.field_keys {
        row.push(record.fields.get(key).cloned().unwrap_or_default());
    }
    row
}

/// Writes `backup_<measurement>.csv` into `out_dir` for one measurement.
///
/// Rows are sorted by the timestamp column (stable, so same-second records
/// keep their log order). With zero qualifying rows no file is created and
/// [`EmitOutcome::Empty`] is returned instead.
///
/// # Errors
///
/// Returns [`EmitError`] if the file cannot be created, written, or flushed.
pub fn write_measurement(
    out_dir: &Path,
    measurement: &str,
    schema: &MeasurementSchema,
    records: &[Record],
) -> Result<EmitOutcome> {
    if records.is_empty() {
        return Ok(EmitOutcome::Empty {
            measurement: measurement.to_string(),
        });
    }

    let mut rows: Vec<Vec<String>> = records.iter().map(|r| project(r, schema)).collect();
    // Sort by the time column before writing, for cheaper TSDB insertion.
    rows.sort_by(|a, b| a[1].cmp(&b[1]));

    let path = out_dir.join(format!("backup_{measurement}.csv"));
    let mut writer = csv::Writer::from_path(&path).map_err(|source| EmitError::Write {
        path: path.clone(),
        source,
    })?;

    writer
        .write_record(header(schema))
        .map_err(|source| EmitError::Write {
            path: path.clone(),
            source,
        })?;
    for row in &rows {
        writer.write_record(row).map_err(|source| EmitError::Write {
            path: path.clone(),
            source,
        })?;
    }
    writer.flush().map_err(|source| EmitError::Flush {
        path: path.clone(),
        source,
    })?;

    Ok(EmitOutcome::Written {
        path,
        rows: rows.len(),
    })
}
