// ── Time ranges and metric samples ──
//
// `MetricSample` replaces the original row-oriented table with a typed
// record; the aggregator operates over these grouped by gateway.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A closed-open interval `[start, end)` in UTC.
///
/// Construction rejects backwards ranges; an empty range
/// (`start == end`) is valid and yields no fetch windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range, rejecting `end < start` as a usage error.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The lookback window ending at `now`.
    pub fn lookback(days: u32, now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(i64::from(days)),
            end: now,
        }
    }

    /// Internal constructor for sub-windows already known to be ordered.
    pub(crate) fn unchecked(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One observation for a (gateway, metric, timestamp) triple.
///
/// Timestamps are aligned to the upstream reporting period; the
/// chunker/collector pairing guarantees the triple is never duplicated
/// because fetch windows are contiguous and non-overlapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub gateway_id: String,
    pub metric: String,
    pub timestamp: DateTime<Utc>,
    pub sum: f64,
    pub average: f64,
    pub maximum: f64,
    pub minimum: f64,
}

impl MetricSample {
    /// Synthetic zero-valued sample, used to keep an (entity, metric)
    /// pair represented when the upstream system never emitted data for
    /// it. Distinguishes "truly zero traffic" bookkeeping from a fetch
    /// failure, which is surfaced as an error instead.
    pub fn zeroed(gateway_id: &str, metric: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            gateway_id: gateway_id.to_owned(),
            metric: metric.to_owned(),
            timestamp,
            sum: 0.0,
            average: 0.0,
            maximum: 0.0,
            minimum: 0.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn range_rejects_backwards_interval() {
        let start = Utc.with_ymd_and_hms(2026, 5, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let err = TimeRange::new(start, end).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { .. }));
    }

    #[test]
    fn range_allows_empty_interval() {
        let t = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let range = TimeRange::new(t, t).unwrap();
        assert!(range.is_empty());
    }

    #[test]
    fn lookback_spans_requested_days() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let range = TimeRange::lookback(90, now);
        assert_eq!(range.end(), now);
        assert_eq!(range.duration(), Duration::days(90));
    }

    #[test]
    fn zeroed_sample_is_all_zero() {
        let t = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let s = MetricSample::zeroed("igw-1", "BytesInFromDestination", t);
        assert_eq!(s.sum, 0.0);
        assert_eq!(s.average, 0.0);
        assert_eq!(s.maximum, 0.0);
        assert_eq!(s.minimum, 0.0);
    }
}
