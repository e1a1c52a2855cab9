// ── Analysis output types ──
//
// `GatewayStats` is the aggregator's per-gateway output; `AnalysisSummary`
// adds the derived totals and rates. Summaries are immutable once built
// and never persisted by the engine itself.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::gateway::GatewayKind;
use super::sample::{MetricSample, TimeRange};

/// Binary activity classification for Internet gateways.
///
/// `Inactive` means every sample of every metric summed to zero over the
/// whole window -- an all-or-nothing judgment across the entire sample
/// set, not just traffic metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum GatewayStatus {
    Active,
    Inactive,
}

/// Traffic totals common to both gateway families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficTotals {
    pub bytes_in: f64,
    pub bytes_out: f64,
    pub packets_in: f64,
    pub packets_out: f64,
}

/// Family-specific counters.
///
/// Keeping these in a tagged variant (rather than a bag of optional
/// fields) means adding a third gateway family later touches this enum
/// and the catalog tables, not the aggregation loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum KindTotals {
    Nat {
        connection_attempts: f64,
        connection_timeouts: f64,
        port_allocation_errors: f64,
        /// Peak of the ActiveConnectionCount samples' own maxima.
        max_active_connections: f64,
        /// Mean of the ActiveConnectionCount samples' own averages.
        avg_active_connections: f64,
    },
    Igw {
        blackhole_drop_bytes: f64,
        no_route_drop_bytes: f64,
        blackhole_drop_packets: f64,
        no_route_drop_packets: f64,
        status: GatewayStatus,
    },
}

/// Per-gateway statistics computed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayStats {
    /// Distinct observation timestamps across all metrics.
    pub total_periods: u64,
    /// Distinct timestamps at which traffic metrics were observed and
    /// every observed one summed to zero.
    pub idle_periods: u64,
    /// `idle / total * 100`, two decimals; 0.0 when no periods exist.
    pub idle_percentage: f64,
    pub traffic: TrafficTotals,
    pub kind_totals: KindTotals,
}

/// One output record per gateway: identity, idle statistics, grouped
/// totals, and derived rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub gateway_id: String,
    pub gateway_name: String,
    pub kind: GatewayKind,
    pub network_id: Option<String>,
    pub network_name: Option<String>,

    pub total_periods: u64,
    pub idle_periods: u64,
    pub idle_percentage: f64,

    pub traffic: TrafficTotals,
    pub total_bytes: f64,
    pub total_packets: f64,
    pub bytes_per_second_avg: f64,
    pub packets_per_second_avg: f64,

    pub kind_totals: KindTotals,
}

/// A gateway whose analysis failed. The other gateways' results are
/// unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayFailure {
    pub gateway_id: String,
    pub gateway_name: String,
    pub error: String,
}

/// Account and region the run was scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisScope {
    pub account_id: String,
    pub region: String,
}

/// The result of one analysis run: summary rows, the flat sample table
/// (for detail reporting), and per-gateway failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub scope: AnalysisScope,
    pub range: TimeRange,
    pub summaries: Vec<AnalysisSummary>,
    pub samples: Vec<MetricSample>,
    pub failures: Vec<GatewayFailure>,
}
