//! Line matching for recognized measurement patterns.
//!
//! The device log is free-form text; only lines that look like measurement
//! writes are of interest. Two line shapes exist:
//!
//! - tagged: `voltage,flow=DC,location=inverter value=0.034,value_raw=0.014 1588110508`
//! - relay (no tag section): `relays value=3227 1588446863`
//!
//! Anything else is silently ignored.

use regex::Regex;

/// Tagged measurement names recognized in device logs.
///
/// The set is fixed: it mirrors the vocabulary the device firmware logs with.
pub const MEASUREMENTS: [&str; 6] = [
    "current",
    "voltage",
    "frequency",
    "energy",
    "power",
    "powerFactor",
];

/// The single untagged measurement name, handled by a separate pattern.
pub const RELAY_MEASUREMENT: &str = "relays";

/// Compiled patterns that isolate candidate measurement lines from raw log
/// text, preserving original line order.
#[derive(Debug)]
pub struct LineMatcher {
    tagged: Regex,
    relay: Regex,
}

impl LineMatcher {
    /// Compiles the two line patterns.
    pub fn new() -> Self {
        // A tagged line starts with a recognized name followed by a comma
        // (the tag section separator).
        let tagged = Regex::new(&format!(r"(?m)^(?:{}),.*", MEASUREMENTS.join("|")))
            .expect("tagged measurement pattern must compile");
        let relay = Regex::new(r"(?m)^relays value.*")
            .expect("relay measurement pattern must compile");
        Self { tagged, relay }
    }

    /// Returns the tagged measurement lines of `text`, in original order.
    pub fn tagged_lines<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.tagged.find_iter(text).map(|m| m.as_str())
    }

    /// Returns the relay measurement lines of `text`, in original order.
    pub fn relay_lines<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.relay.find_iter(text).map(|m| m.as_str())
    }
}

impl Default for LineMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
boot: device up
voltage,flow=DC,location=inverter value=0.034,value_raw=0.014 1588110508
current,flow=DC,location=solar_panel value=-1.492,value_raw=2.179 1588110508
relays value=3227 1588446863
INFO voltage,flow=DC not a measurement line
powerFactor,flow=AC value=0.98 1588110509
shutdown requested
";

    #[test]
    fn test_tagged_lines_matched_in_order() {
        let matcher = LineMatcher::new();
        let lines: Vec<&str> = matcher.tagged_lines(LOG).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("voltage,"));
        assert!(lines[1].starts_with("current,"));
        assert!(lines[2].starts_with("powerFactor,"));
    }

    #[test]
    fn test_tagged_requires_line_start() {
        // "voltage," appears mid-line in an INFO message; it must not match.
        let matcher = LineMatcher::new();
        let lines: Vec<&str> = matcher.tagged_lines(LOG).collect();
        assert!(!lines.iter().any(|l| l.contains("not a measurement")));
    }

    #[test]
    fn test_tagged_requires_comma_after_name() {
        let matcher = LineMatcher::new();
        // No tag section, so the tagged pattern must not fire.
        let lines: Vec<&str> = matcher.tagged_lines("voltage value=1 1588110508\n").collect();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_relay_lines_matched_separately() {
        let matcher = LineMatcher::new();
        let lines: Vec<&str> = matcher.relay_lines(LOG).collect();
        assert_eq!(lines, vec!["relays value=3227 1588446863"]);
        // Relay lines never match the tagged pattern.
        assert!(!matcher.tagged_lines(LOG).any(|l| l.starts_with("relays")));
    }

    #[test]
    fn test_unrelated_lines_ignored() {
        let matcher = LineMatcher::new();
        assert_eq!(matcher.tagged_lines("nothing to see here\n").count(), 0);
        assert_eq!(matcher.relay_lines("nothing to see here\n").count(), 0);
    }

    #[test]
    fn test_unrecognized_measurement_ignored() {
        let matcher = LineMatcher::new();
        let lines: Vec<&str> = matcher
            .tagged_lines("temperature,location=case value=40.1 1588110508\n")
            .collect();
        assert!(lines.is_empty());
    }
}
