//! Schema inference: per-measurement union of observed tag and field keys.
//!
//! The schema is built once from the full filtered record stream (pass 1)
//! and is read-only afterwards. Accumulation is a commutative set union, so
//! the order records are observed in never affects the result. `BTreeMap` /
//! `BTreeSet` keep measurement iteration and key order sorted, which gives
//! the emitter its stable, reproducible headers for free.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::record::Record;

/// Union of keys observed for one measurement across the entire log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeasurementSchema {
    /// All tag keys observed, sorted ascending.
    pub tag_keys: BTreeSet<String>,
    /// All field keys observed, sorted ascending.
    pub field_keys: BTreeSet<String>,
}

impl MeasurementSchema {
    /// The fixed schema of the untagged relay measurement: no tags, a single
    /// `value` field.
    pub fn relay() -> Self {
        Self {
            tag_keys: BTreeSet::new(),
            field_keys: BTreeSet::from(["value".to_string()]),
        }
    }
}

/// Per-measurement schemas for every measurement with at least one
/// qualifying record.
///
/// Measurements absent from the log (or filtered out entirely) do not
/// appear, and consequently produce no output file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    measurements: BTreeMap<String, MeasurementSchema>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one record's tag and field keys into the running union.
    pub fn observe(&mut self, record: &Record) {
        let entry = self.measurements.entry(record.measurement.clone()).or_default();
        entry.tag_keys.extend(record.tags.keys().cloned());
        entry.field_keys.extend(record.fields.keys().cloned());
    }

    /// Returns the schema for one measurement, if any record of it was seen.
    pub fn get(&self, measurement: &str) -> Option<&MeasurementSchema> {
        self.measurements.get(measurement)
    }

    /// Returns the distinct measurement names observed, sorted ascending.
    pub fn measurement_names(&self) -> impl Iterator<Item = &str> {
        self.measurements.keys().map(String::as_str)
    }

    /// Returns `true` if no measurement was observed at all.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Number of distinct measurements observed.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }
}
