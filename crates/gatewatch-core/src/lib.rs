//! Idle-usage analysis engine for network gateways.
//!
//! This crate owns the business logic and domain model for the
//! gatewatch workspace:
//!
//! - **[`Analyzer`]** — Central facade for an analysis run:
//!   [`analyze()`](Analyzer::analyze) fans out over gateways with
//!   bounded concurrency, collects each gateway's metric samples,
//!   aggregates idle/traffic statistics, and assembles the final
//!   [`AnalysisReport`].
//!
//! - **[`window`]** — Splits a `[start, end)` range into contiguous
//!   fetch windows no longer than the upstream API accepts.
//!
//! - **[`collect`]** — Walks the windows per (gateway, metric) pair,
//!   reproducing the upstream's missing-data policy: IGW metrics are
//!   existence-probed and zero-filled, fetch failures propagate with
//!   full context instead of degrading into silence.
//!
//! - **[`aggregate`] / [`summary`]** — Distinct-period counting, idle
//!   classification, catalog-driven grouped sums, and derived rates.
//!
//! - **Capability traits** ([`MetricsSource`], [`GatewayDiscovery`]) —
//!   The seams to the provider. [`gatewatch_api::TelemetryClient`]
//!   implements both; tests use in-memory fakes.

pub mod aggregate;
pub mod analyzer;
pub mod catalog;
pub mod collect;
pub mod convert;
pub mod error;
pub mod model;
mod provider;
pub mod source;
pub mod summary;
pub mod window;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::aggregate as aggregate_samples;
pub use analyzer::{Analyzer, AnalyzerOptions};
pub use collect::{collect_gateway_samples, CollectOptions};
pub use convert::{discover_gateways, resolve_account_id};
pub use error::CoreError;
pub use source::{GatewayDiscovery, MetricsSource};
pub use summary::build_summary;
pub use window::fetch_windows;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AnalysisReport,
    AnalysisScope,
    AnalysisSummary,
    Gateway,
    GatewayFailure,
    GatewayKind,
    GatewayStats,
    GatewayStatus,
    KindTotals,
    MetricSample,
    TimeRange,
    TrafficTotals,
};
