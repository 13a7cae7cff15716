//! Two-phase extraction pipeline.
//!
//! Phase 1 parses and filters every matched line once, grouping records into
//! per-measurement buckets while accumulating the schema. Phase 2 projects
//! each bucket through the frozen schema and writes one CSV file per
//! measurement. Grouping during phase 1 replaces the historical
//! re-scan-per-measurement strategy; the output is observably identical and
//! the log text is traversed once per pattern instead of once per
//! measurement.
//!
//! Parsing completes for both the tagged and relay streams before any file
//! is written, so a malformed line anywhere in the log aborts the run with
//! zero output files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::emit::{self, EmitOutcome};
use crate::error::{InputError, Result};
use crate::filter::TimeFilter;
use crate::matcher::{LineMatcher, RELAY_MEASUREMENT};
use crate::record::Record;
use crate::schema::{MeasurementSchema, Schema};

/// Options for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Optional lower bound, strictly exclusive,
    /// `yyyy-mm-ddTHH:MM:SS[.ffffff]`.
    pub timestamp_from: Option<String>,
    /// Optional upper bound, strictly exclusive, same format.
    pub timestamp_to: Option<String>,
    /// Directory the `backup_<measurement>.csv` files are written to.
    pub out_dir: PathBuf,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            timestamp_from: None,
            timestamp_to: None,
            out_dir: PathBuf::from("."),
        }
    }
}

/// Summary of one extraction run.
#[derive(Debug)]
pub struct ExtractReport {
    /// Schema discovered for the tagged measurements.
    pub schema: Schema,
    /// Per-measurement emission outcomes, relay path included.
    pub outcomes: Vec<EmitOutcome>,
}

impl ExtractReport {
    /// Number of CSV files actually written.
    pub fn files_written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EmitOutcome::Written { .. }))
            .count()
    }

    /// Returns `true` if no tagged or relay record qualified at all.
    pub fn is_empty(&self) -> bool {
        self.files_written() == 0
    }
}

/// Runs the full pipeline over a log file on disk.
///
/// # Errors
///
/// Returns [`crate::SieveError`] if the file cannot be read, a matched line
/// is malformed, or a CSV file cannot be written.
pub fn extract_file(path: &Path, options: &ExtractOptions) -> Result<ExtractReport> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    extract_str(&text, options)
}

/// Runs the full pipeline over in-memory log text.
///
/// # Errors
///
/// Returns [`crate::SieveError`] if a matched line is malformed or a CSV
/// file cannot be written.
pub fn extract_str(text: &str, options: &ExtractOptions) -> Result<ExtractReport> {
    let matcher = LineMatcher::new();
    let filter = TimeFilter::from_bounds(
        options.timestamp_from.as_deref(),
        options.timestamp_to.as_deref(),
    );

    // Phase 1a: tagged stream. Parse, filter, accumulate schema, bucket.
    let mut schema = Schema::new();
    let mut buckets: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for line in matcher.tagged_lines(text) {
        let record = Record::parse_tagged(line)?;
        if !filter.keep(record.timestamp) {
            continue;
        }
        schema.observe(&record);
        buckets
            .entry(record.measurement.clone())
            .or_default()
            .push(record);
    }

    // Phase 1b: relay stream. Fixed schema, shared filter.
    let mut relay_records = Vec::new();
    for line in matcher.relay_lines(text) {
        let record = Record::parse_relay(line)?;
        if filter.keep(record.timestamp) {
            relay_records.push(record);
        }
    }

    debug!(
        measurements = schema.len(),
        relay_records = relay_records.len(),
        "schema discovery complete"
    );

    // Phase 2: per-measurement emission against the frozen schema. Each
    // write is independent of the others.
    let mut outcomes = Vec::with_capacity(buckets.len() + 1);
    for (measurement, records) in &buckets {
        let Some(measurement_schema) = schema.get(measurement) else {
            continue;
        };
        outcomes.push(emit::write_measurement(
            &options.out_dir,
            measurement,
            measurement_schema,
            records,
        )?);
    }
    outcomes.push(emit::write_measurement(
        &options.out_dir,
        RELAY_MEASUREMENT,
        &MeasurementSchema::relay(),
        &relay_records,
    )?);

    Ok(ExtractReport { schema, outcomes })
}
