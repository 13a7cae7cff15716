//! # logsieve
//!
//! Extracts time-series measurements embedded in line-oriented device logs
//! and converts them into time-series-database-ready CSV files, one file per
//! measurement type.
//!
//! Built for backfilling historical sensor data from a solar power switching
//! prototype whose firmware logs readings in an InfluxDB-like line format:
//!
//! ```text
//! voltage,flow=DC,location=inverter value=0.034,value_raw=0.014 1588110508
//! relays value=3227 1588446863
//! ```
//!
//! ## Pipeline
//!
//! 1. Pattern matching isolates measurement lines (everything else in the
//!    log is ignored).
//! 2. Each matched line is parsed into a fixed-shape [`Record`].
//! 3. Records outside the optional time bounds are dropped (both bounds
//!    strictly exclusive).
//! 4. Schema inference takes the union of tag and field keys per measurement
//!    across the whole file.
//! 5. One `backup_<measurement>.csv` per measurement, with a deterministic
//!    sorted header and chronologically sorted rows.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logsieve::{ExtractOptions, extract_file};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ExtractOptions {
//!     timestamp_from: Some("2020-04-01T00:00:00".to_string()),
//!     timestamp_to: None,
//!     out_dir: ".".into(),
//! };
//! let report = extract_file("solarswitch.log".as_ref(), &options)?;
//! println!("{} CSV files written", report.files_written());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`matcher`] — line recognition for the fixed measurement set
//! - [`record`] — parsing matched lines into records
//! - [`filter`] — optional strictly-exclusive time bounds
//! - [`schema`] — per-measurement tag/field key inference
//! - [`emit`] — deterministic CSV serialization
//! - [`pipeline`] — two-phase orchestration
//! - [`error`] — error types

pub mod emit;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod pipeline;
pub mod record;
pub mod schema;

// Re-export primary API types at crate root for convenience.
pub use emit::EmitOutcome;
pub use error::{Result, SieveError};
pub use filter::TimeFilter;
pub use matcher::{LineMatcher, MEASUREMENTS, RELAY_MEASUREMENT};
pub use pipeline::{ExtractOptions, ExtractReport, extract_file, extract_str};
pub use record::Record;
pub use schema::{MeasurementSchema, Schema};
