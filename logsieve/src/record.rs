//! Parsing matched log lines into fixed-shape records.
//!
//! A matched line has three space-separated sections:
//!
//! ```text
//! measurement[,tag=val,...] field=val[,field=val...] unixSeconds
//! ```
//!
//! Tag and field values are kept as raw strings; no numeric coercion happens
//! anywhere in the pipeline, so the CSV output reproduces the exact textual
//! representation found in the log.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::{ParseError, Result};

/// A single measurement reading parsed from one log line.
///
/// Records are ephemeral: they are consumed immediately by schema
/// accumulation and CSV emission and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Measurement name, e.g. `voltage`.
    pub measurement: String,
    /// Tag key/value pairs describing the reading's source context.
    pub tags: BTreeMap<String, String>,
    /// Field key/value pairs carrying the reading's payload, raw text.
    pub fields: BTreeMap<String, String>,
    /// Instant of the reading, second precision, UTC.
    pub timestamp: DateTime<Utc>,
}

impl Record {
    /// Parses a tagged measurement line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the line has fewer than three sections, an
    /// assignment is missing its `=`, or the timestamp is not an integer.
    pub fn parse_tagged(line: &str) -> Result<Self> {
        let line = line.trim_end();
        let (first, fields_section, ts_section) = split_sections(line)?;

        // First section is the measurement name plus zero or more tag
        // assignments, comma separated.
        let (measurement, tag_section) = first.split_once(',').unwrap_or((first, ""));

        let mut tags = BTreeMap::new();
        if !tag_section.is_empty() {
            for assignment in tag_section.split(',') {
                let (key, value) = split_assignment(line, assignment)?;
                tags.insert(key.to_string(), value.to_string());
            }
        }

        let mut fields = BTreeMap::new();
        for assignment in fields_section.split(',') {
            let (key, value) = split_assignment(line, assignment)?;
            fields.insert(key.to_string(), value.to_string());
        }

        Ok(Self {
            measurement: measurement.to_string(),
            tags,
            fields,
            timestamp: parse_timestamp(line, ts_section)?,
        })
    }

    /// Parses a relay measurement line (`relays value=<number> <unixSeconds>`).
    ///
    /// Relay lines carry no tag section and a single `value` field.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] under the same conditions as
    /// [`Record::parse_tagged`].
    pub fn parse_relay(line: &str) -> Result<Self> {
        let line = line.trim_end();
        let (measurement, value_section, ts_section) = split_sections(line)?;

        let (_, value) = split_assignment(line, value_section)?;
        let mut fields = BTreeMap::new();
        fields.insert("value".to_string(), value.to_string());

        Ok(Self {
            measurement: measurement.to_string(),
            tags: BTreeMap::new(),
            fields,
            timestamp: parse_timestamp(line, ts_section)?,
        })
    }

    /// Renders the timestamp as an ISO-8601 UTC string with second precision,
    /// e.g. `2020-05-02T19:14:23Z`.
    ///
    /// ISO-8601 UTC strings of this shape sort chronologically under plain
    /// lexicographic comparison, which the emitter relies on.
    pub fn iso_time(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

/// Splits a line into its three space-separated sections.
fn split_sections(line: &str) -> Result<(&str, &str, &str)> {
    let sections: Vec<&str> = line.split(' ').collect();
    if sections.len() < 3 {
        return Err(ParseError::MissingSection {
            line: line.to_string(),
            found: sections.len(),
        }
        .into());
    }
    Ok((sections[0], sections[1], sections[2]))
}

/// Splits a `key=value` assignment on the first `=`.
fn split_assignment<'a>(line: &str, assignment: &'a str) -> Result<(&'a str, &'a str)> {
    assignment.split_once('=').ok_or_else(|| {
        ParseError::MissingEquals {
            line: line.to_string(),
            assignment: assignment.to_string(),
        }
        .into()
    })
}

/// Parses the timestamp section as integer Unix seconds, UTC.
fn parse_timestamp(line: &str, section: &str) -> Result<DateTime<Utc>> {
    let seconds: i64 = section.parse().map_err(|_| ParseError::InvalidTimestamp {
        line: line.to_string(),
        timestamp: section.to_string(),
    })?;
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        ParseError::TimestampOutOfRange {
            line: line.to_string(),
            seconds,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SieveError;

    #[test]
    fn test_parse_tagged_line() {
        let record =
            Record::parse_tagged("voltage,flow=DC,location=inverter value=0.034,value_raw=0.014 1588110508")
                .unwrap();

        assert_eq!(record.measurement, "voltage");
        assert_eq!(record.tags.get("flow").map(String::as_str), Some("DC"));
        assert_eq!(record.tags.get("location").map(String::as_str), Some("inverter"));
        assert_eq!(record.fields.get("value").map(String::as_str), Some("0.034"));
        assert_eq!(record.fields.get("value_raw").map(String::as_str), Some("0.014"));
        assert_eq!(record.iso_time(), "2020-04-28T21:48:28Z");
    }

    #[test]
    fn test_values_preserved_verbatim() {
        // Negative numbers and trailing zeros survive exactly as logged.
        let record =
            Record::parse_tagged("current,flow=DC,location=solar_panel value=-1.492,value_raw=2.179 1588110508")
                .unwrap();
        assert_eq!(record.fields.get("value").map(String::as_str), Some("-1.492"));

        let record = Record::parse_tagged("voltage,flow=DC value=0.000,value_raw=-0.000 1588110508").unwrap();
        assert_eq!(record.fields.get("value").map(String::as_str), Some("0.000"));
        assert_eq!(record.fields.get("value_raw").map(String::as_str), Some("-0.000"));
    }

    #[test]
    fn test_assignment_splits_on_first_equals() {
        let record = Record::parse_tagged("energy,note=a=b value=x=y 1588110508").unwrap();
        assert_eq!(record.tags.get("note").map(String::as_str), Some("a=b"));
        assert_eq!(record.fields.get("value").map(String::as_str), Some("x=y"));
    }

    #[test]
    fn test_parse_relay_line() {
        let record = Record::parse_relay("relays value=3227 1588446863").unwrap();
        assert_eq!(record.measurement, "relays");
        assert!(record.tags.is_empty());
        assert_eq!(record.fields.get("value").map(String::as_str), Some("3227"));
        assert_eq!(record.iso_time(), "2020-05-02T19:14:23Z");
    }

    #[test]
    fn test_trailing_carriage_return_tolerated() {
        let record = Record::parse_relay("relays value=3227 1588446863\r").unwrap();
        assert_eq!(record.iso_time(), "2020-05-02T19:14:23Z");
    }

    #[test]
    fn test_missing_section_is_error() {
        let err = Record::parse_tagged("voltage,flow=DC value=0.034").unwrap_err();
        assert!(matches!(
            err,
            SieveError::Parse(ParseError::MissingSection { found: 2, .. })
        ));
    }

    #[test]
    fn test_missing_equals_is_error() {
        let err = Record::parse_tagged("voltage,flow value=0.034 1588110508").unwrap_err();
        assert!(matches!(
            err,
            SieveError::Parse(ParseError::MissingEquals { .. })
        ));
    }

    #[test]
    fn test_non_integer_timestamp_is_error() {
        let err = Record::parse_tagged("voltage,flow=DC value=0.034 late").unwrap_err();
        assert!(matches!(
            err,
            SieveError::Parse(ParseError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_negative_timestamp_is_pre_epoch() {
        let record = Record::parse_relay("relays value=1 -1").unwrap();
        assert_eq!(record.iso_time(), "1969-12-31T23:59:59Z");
    }
}
