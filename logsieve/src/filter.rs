//! Time-range filtering with strictly exclusive bounds.
//!
//! Both bounds are optional and independent. The boundary semantics are
//! asymmetric on purpose: a record whose timestamp exactly equals either
//! bound is excluded (`ts > from && ts < to`). Downstream tooling depends on
//! this exact behavior, so it must not be widened to inclusive comparisons.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

/// Accepted bound string formats: whole seconds, or with fractional seconds.
const BOUND_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Keep/discard decision for records based on optional timestamp bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeFilter {
    from: Option<NaiveDateTime>,
    to: Option<NaiveDateTime>,
}

impl TimeFilter {
    /// Builds a filter from optional caller-supplied bound strings.
    ///
    /// A bound string that parses under neither accepted format disables
    /// that bound rather than failing the run. This matches the historical
    /// behavior of the extraction tooling; a warning is logged so the
    /// operator can tell filtering was not applied.
    pub fn from_bounds(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.and_then(parse_bound),
            to: to.and_then(parse_bound),
        }
    }

    /// Returns `true` if a record at `timestamp` passes both bounds.
    pub fn keep(&self, timestamp: DateTime<Utc>) -> bool {
        let ts = timestamp.naive_utc();
        if let Some(from) = self.from
            && ts <= from
        {
            return false;
        }
        if let Some(to) = self.to
            && ts >= to
        {
            return false;
        }
        true
    }

    /// Returns `true` if neither bound is active.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Parses a bound string, trying each accepted format in turn.
fn parse_bound(s: &str) -> Option<NaiveDateTime> {
    for format in BOUND_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    warn!("timestamp bound '{s}' matches neither accepted format; bound disabled");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    // 1588110508 == 2020-04-28T21:48:28Z
    const TS: i64 = 1_588_110_508;

    #[test]
    fn test_no_bounds_keeps_everything() {
        let filter = TimeFilter::from_bounds(None, None);
        assert!(filter.is_unbounded());
        assert!(filter.keep(at(0)));
        assert!(filter.keep(at(TS)));
    }

    #[test]
    fn test_lower_bound_is_strictly_exclusive() {
        let filter = TimeFilter::from_bounds(Some("2020-04-28T21:48:28"), None);
        assert!(!filter.keep(at(TS)), "exact boundary must be excluded");
        assert!(!filter.keep(at(TS - 1)));
        assert!(filter.keep(at(TS + 1)));
    }

    #[test]
    fn test_upper_bound_is_strictly_exclusive() {
        let filter = TimeFilter::from_bounds(None, Some("2020-04-28T21:48:28"));
        assert!(!filter.keep(at(TS)), "exact boundary must be excluded");
        assert!(filter.keep(at(TS - 1)));
        assert!(!filter.keep(at(TS + 1)));
    }

    #[test]
    fn test_between_both_bounds_is_kept() {
        let filter = TimeFilter::from_bounds(
            Some("2020-04-28T21:48:27"),
            Some("2020-04-28T21:48:29"),
        );
        assert!(filter.keep(at(TS)));
        assert!(!filter.keep(at(TS - 1)));
        assert!(!filter.keep(at(TS + 1)));
    }

    #[test]
    fn test_fractional_seconds_format_accepted() {
        let filter = TimeFilter::from_bounds(Some("2020-04-28T21:48:27.500000"), None);
        assert!(!filter.is_unbounded());
        // 21:48:28 > 21:48:27.5
        assert!(filter.keep(at(TS)));
        assert!(!filter.keep(at(TS - 1)));
    }

    #[test]
    fn test_unparsable_bound_is_disabled() {
        let filter = TimeFilter::from_bounds(Some("28/04/2020 21:48"), None);
        assert!(filter.is_unbounded());
        assert!(filter.keep(at(0)));
    }
}
