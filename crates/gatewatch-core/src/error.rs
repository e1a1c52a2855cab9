// ── Core error types ──
//
// User-facing errors from gatewatch-core. Consumers never see raw HTTP
// status codes -- upstream failures are wrapped with enough context
// (gateway id, metric name, failed window) to retry the affected pair.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Usage errors ─────────────────────────────────────────────────
    /// The requested interval runs backwards. Rejected immediately,
    /// never silently corrected.
    #[error("Invalid time range: end {end} precedes start {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Fetch windows must have a positive maximum duration.
    #[error("Invalid chunk duration: must be positive")]
    InvalidChunkDuration,

    /// The wire record carried a kind string outside the known taxonomy.
    #[error("Unknown gateway kind: {kind}")]
    UnknownKind { kind: String },

    // ── Upstream fetch failures ──────────────────────────────────────
    /// A single window fetch failed. Collection for the affected
    /// (gateway, metric) pair is aborted; partial results are discarded.
    #[error(
        "Metric fetch failed for gateway {gateway_id}, metric {metric}, \
         window [{window_start}, {window_end}): {source}"
    )]
    Fetch {
        gateway_id: String,
        metric: String,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        #[source]
        source: gatewatch_api::Error,
    },

    /// The existence probe failed (distinct from the metric not existing,
    /// which is not an error at all).
    #[error("Existence probe failed for gateway {gateway_id}, metric {metric}: {source}")]
    Probe {
        gateway_id: String,
        metric: String,
        #[source]
        source: gatewatch_api::Error,
    },

    /// Gateway enumeration failed.
    #[error("Gateway discovery failed: {0}")]
    Discovery(#[source] gatewatch_api::Error),
}

impl CoreError {
    /// Returns `true` if retrying the failed operation might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Fetch { source, .. } | Self::Probe { source, .. } | Self::Discovery(source) => {
                source.is_transient()
            }
            _ => false,
        }
    }
}
