//! Canonical domain types for the analysis engine.

mod gateway;
mod report;
mod sample;

pub use gateway::{Gateway, GatewayKind};
pub use report::{
    AnalysisReport, AnalysisScope, AnalysisSummary, GatewayFailure, GatewayStats, GatewayStatus,
    KindTotals, TrafficTotals,
};
pub use sample::{MetricSample, TimeRange};
