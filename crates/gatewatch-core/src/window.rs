//! Window chunker: splits a requested range into fetch-sized windows.
//!
//! The upstream metrics API rejects overly long ranges in a single call,
//! so a `[start, end)` range is walked as contiguous, non-overlapping
//! sub-windows no longer than the maximum chunk duration. Pure and
//! stateless; the iterator is `Clone` so a range can be re-walked per
//! metric.

use chrono::{DateTime, Duration, Utc};

use crate::error::CoreError;
use crate::model::TimeRange;

/// Lazy iterator over the fetch windows of a range.
///
/// Invariants: the first window starts at `range.start()`, consecutive
/// windows share a boundary with no gap and no overlap, every window is
/// at most `max_chunk` long, and the last window ends exactly at
/// `range.end()`. An empty range yields no windows.
#[derive(Debug, Clone)]
pub struct FetchWindows {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    max_chunk: Duration,
}

/// Split `range` into fetch windows of at most `max_chunk`.
///
/// A non-positive `max_chunk` is a usage error. Backwards ranges are
/// unrepresentable -- [`TimeRange::new`] already rejects them.
pub fn fetch_windows(range: TimeRange, max_chunk: Duration) -> Result<FetchWindows, CoreError> {
    if max_chunk <= Duration::zero() {
        return Err(CoreError::InvalidChunkDuration);
    }
    Ok(FetchWindows {
        cursor: range.start(),
        end: range.end(),
        max_chunk,
    })
}

impl Iterator for FetchWindows {
    type Item = TimeRange;

    fn next(&mut self) -> Option<TimeRange> {
        if self.cursor >= self.end {
            return None;
        }
        let window_end = (self.cursor + self.max_chunk).min(self.end);
        let window = TimeRange::unchecked(self.cursor, window_end);
        self.cursor = window_end;
        Some(window)
    }
}
