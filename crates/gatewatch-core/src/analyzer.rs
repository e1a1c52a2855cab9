//! Analysis orchestrator.
//!
//! Central facade over the engine: fans out over gateways with bounded
//! concurrency, runs collect → aggregate → summarize per gateway, and
//! assembles the final report. Gateways share no mutable state, so one
//! gateway's failure never aborts the others; within one
//! (gateway, metric) pair the fetch windows stay strictly chronological.

use chrono::{Duration, Utc};
use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::aggregate::aggregate;
use crate::catalog;
use crate::collect::{collect_gateway_samples, CollectOptions};
use crate::model::{AnalysisReport, AnalysisScope, Gateway, TimeRange};
use crate::source::MetricsSource;
use crate::summary::build_summary;

/// Tuning knobs for an analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerOptions {
    /// Maximum fetch-window length per upstream call.
    pub max_chunk: Duration,
    /// Upstream reporting period in seconds.
    pub period_seconds: u32,
    /// How many gateways are analyzed concurrently.
    pub concurrency: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_chunk: Duration::days(catalog::MAX_CHUNK_DAYS),
            period_seconds: catalog::PERIOD_SECONDS,
            concurrency: 4,
        }
    }
}

/// The engine's entry point: owns the metric source and the run options.
pub struct Analyzer<S> {
    source: S,
    options: AnalyzerOptions,
}

impl<S: MetricsSource> Analyzer<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, AnalyzerOptions::default())
    }

    pub fn with_options(source: S, options: AnalyzerOptions) -> Self {
        Self { source, options }
    }

    /// Analyze the lookback window ending now.
    pub async fn analyze_lookback(
        &self,
        scope: AnalysisScope,
        gateways: &[Gateway],
        lookback_days: u32,
    ) -> AnalysisReport {
        let range = TimeRange::lookback(lookback_days, Utc::now());
        self.analyze(scope, gateways, range).await
    }

    /// Analyze every gateway over `range`.
    ///
    /// Summary rows and the sample table are ordered by (kind, id)
    /// regardless of completion order; failed gateways are reported in
    /// `failures` with their error context and do not appear in
    /// `summaries`.
    pub async fn analyze(
        &self,
        scope: AnalysisScope,
        gateways: &[Gateway],
        range: TimeRange,
    ) -> AnalysisReport {
        let collect_options = CollectOptions {
            max_chunk: self.options.max_chunk,
            period_seconds: self.options.period_seconds,
        };

        let mut outcomes: Vec<_> = stream::iter(gateways.iter().cloned())
            .map(|gateway| async move {
                info!(gateway = %gateway.id, name = %gateway.name, kind = %gateway.kind, "collecting metrics");
                let result =
                    collect_gateway_samples(&self.source, &gateway, range, &collect_options).await;
                (gateway, result)
            })
            .buffer_unordered(self.options.concurrency.max(1))
            .collect()
            .await;

        outcomes.sort_by(|a, b| (a.0.kind, &a.0.id).cmp(&(b.0.kind, &b.0.id)));

        let mut summaries = Vec::new();
        let mut samples = Vec::new();
        let mut failures = Vec::new();

        for (gateway, result) in outcomes {
            match result {
                Ok(gateway_samples) => {
                    let stats = aggregate(&gateway, &gateway_samples);
                    summaries.push(build_summary(&gateway, stats, self.options.period_seconds));
                    samples.extend(gateway_samples);
                }
                Err(err) => {
                    warn!(gateway = %gateway.id, %err, "gateway analysis failed");
                    failures.push(crate::model::GatewayFailure {
                        gateway_id: gateway.id,
                        gateway_name: gateway.name,
                        error: err.to_string(),
                    });
                }
            }
        }

        AnalysisReport {
            scope,
            range,
            summaries,
            samples,
            failures,
        }
    }
}
