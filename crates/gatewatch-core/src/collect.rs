//! Metric sample collector.
//!
//! For each metric in a gateway's catalog, walks the chunker's fetch
//! windows in chronological order and concatenates the results into the
//! flat sample table the aggregator consumes.
//!
//! Two policies from the upstream system are reproduced exactly:
//!
//! - IGW metrics are existence-probed first; a metric with no data at
//!   all is represented by a single synthetic zero sample at the range
//!   start instead of being silently dropped. NAT metrics are always
//!   fetched, no probe.
//! - A failed window fetch aborts collection for that (gateway, metric)
//!   pair and discards prior partial results -- a failure must never
//!   degrade into zero-filled samples, which would be indistinguishable
//!   from genuine idleness.

use chrono::Duration;
use tracing::debug;

use crate::catalog;
use crate::error::CoreError;
use crate::model::{Gateway, GatewayKind, MetricSample, TimeRange};
use crate::source::MetricsSource;
use crate::window::fetch_windows;

/// Knobs for the collection pass.
#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    /// Maximum fetch-window length.
    pub max_chunk: Duration,
    /// Upstream reporting period in seconds.
    pub period_seconds: u32,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            max_chunk: Duration::days(catalog::MAX_CHUNK_DAYS),
            period_seconds: catalog::PERIOD_SECONDS,
        }
    }
}

/// Collect every catalog metric for one gateway over `range`.
///
/// Output is metric-major in catalog order, time-ascending within each
/// metric. Any fetch or probe failure aborts the whole gateway; the
/// caller decides whether other gateways keep running.
pub async fn collect_gateway_samples<S: MetricsSource>(
    source: &S,
    gateway: &Gateway,
    range: TimeRange,
    options: &CollectOptions,
) -> Result<Vec<MetricSample>, CoreError> {
    let mut samples = Vec::new();
    // Validate the chunk configuration up front, before any fetch.
    let windows = fetch_windows(range, options.max_chunk)?;

    for metric in catalog::metric_names(gateway.kind) {
        collect_metric(source, gateway, metric, range, windows.clone(), options, &mut samples)
            .await?;
    }

    Ok(samples)
}

/// Collect one (gateway, metric) pair across all fetch windows.
async fn collect_metric<S: MetricsSource>(
    source: &S,
    gateway: &Gateway,
    metric: &str,
    range: TimeRange,
    windows: crate::window::FetchWindows,
    options: &CollectOptions,
    samples: &mut Vec<MetricSample>,
) -> Result<(), CoreError> {
    // Existence probe, IGW only. A metric the upstream never emitted is
    // bookkept as a zero observation, not fetched and not an error.
    if gateway.kind == GatewayKind::Igw {
        let exists = source
            .exists(&gateway.id, metric)
            .await
            .map_err(|source| CoreError::Probe {
                gateway_id: gateway.id.clone(),
                metric: metric.to_owned(),
                source,
            })?;
        if !exists {
            debug!(gateway = %gateway.id, metric, "no data, recording zero sample");
            samples.push(MetricSample::zeroed(&gateway.id, metric, range.start()));
            return Ok(());
        }
    }

    let mut collected = Vec::new();
    for window in windows {
        let points = source
            .fetch(&gateway.id, metric, window, options.period_seconds)
            .await
            .map_err(|source| CoreError::Fetch {
                gateway_id: gateway.id.clone(),
                metric: metric.to_owned(),
                window_start: window.start(),
                window_end: window.end(),
                source,
            })?;
        collected.extend(points);
    }

    // Idle detection depends on exact timestamp identity across window
    // boundaries; the upstream does not guarantee order within a window.
    collected.sort_by_key(|p| p.timestamp);

    debug!(gateway = %gateway.id, metric, points = collected.len(), "collected datapoints");

    // An IGW metric that probed positive but returned nothing still gets
    // the zero bookkeeping entry.
    if collected.is_empty() && gateway.kind == GatewayKind::Igw {
        samples.push(MetricSample::zeroed(&gateway.id, metric, range.start()));
        return Ok(());
    }

    samples.extend(collected.into_iter().map(|p| MetricSample {
        gateway_id: gateway.id.clone(),
        metric: metric.to_owned(),
        timestamp: p.timestamp,
        sum: p.sum,
        average: p.average,
        maximum: p.maximum,
        minimum: p.minimum,
    }));

    Ok(())
}
