//! Error types for the logsieve extraction pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for all logsieve operations.
///
/// All fatal conditions terminate the run. A malformed matched line aborts
/// before any CSV file is written, so a failed run never leaves partial
/// output behind.
#[derive(Error, Debug)]
pub enum SieveError {
    /// Error reading the input log file.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Error parsing a matched log line.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error writing a CSV output file.
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),
}

/// Errors that can occur when reading the input log.
#[derive(Error, Debug)]
pub enum InputError {
    /// The log file does not exist or could not be read.
    #[error("failed to read log file '{}': {source}", path.display())]
    Unreadable {
        /// The log file path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while parsing a matched line into a record.
///
/// Each variant carries the full offending line so the operator can locate
/// the problem in the source log.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The line has fewer than the three space-separated sections
    /// (`measurement[,tags]`, `fields`, `timestamp`).
    #[error("expected 3 space-separated sections, found {found} in line '{line}'")]
    MissingSection {
        /// The offending line.
        line: String,
        /// How many sections were actually present.
        found: usize,
    },

    /// A tag or field assignment is missing its `=` separator.
    #[error("assignment '{assignment}' has no '=' in line '{line}'")]
    MissingEquals {
        /// The offending line.
        line: String,
        /// The assignment that could not be split.
        assignment: String,
    },

    /// The timestamp section is not an integer number of Unix seconds.
    #[error("invalid unix timestamp '{timestamp}' in line '{line}'")]
    InvalidTimestamp {
        /// The offending line.
        line: String,
        /// The text found where a timestamp was expected.
        timestamp: String,
    },

    /// The timestamp parsed as an integer but cannot be represented as a
    /// calendar instant.
    #[error("timestamp {seconds} is outside the representable range in line '{line}'")]
    TimestampOutOfRange {
        /// The offending line.
        line: String,
        /// The out-of-range seconds value.
        seconds: i64,
    },
}

/// Errors that can occur while writing CSV output files.
#[derive(Error, Debug)]
pub enum EmitError {
    /// Failed to create or write a CSV file.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        /// The output file path.
        path: PathBuf,
        /// The underlying CSV/I/O error.
        #[source]
        source: csv::Error,
    },

    /// Failed to flush a CSV file to disk.
    #[error("failed to flush '{}': {source}", path.display())]
    Flush {
        /// The output file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for `Result<T, SieveError>`.
pub type Result<T> = std::result::Result<T, SieveError>;
