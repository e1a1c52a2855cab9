//! Summary builder: derived totals and rates.
//!
//! Pure function of the aggregator's output. The usage-error class the
//! engine rejects here (negative period counts, unknown gateway kinds)
//! is unrepresentable in the typed model, so building a summary cannot
//! fail.

use crate::aggregate::round2;
use crate::model::{AnalysisSummary, Gateway, GatewayStats};

/// Assemble the final per-gateway record from the aggregator's
/// statistics.
///
/// Rates divide by `max(total_periods * period_seconds, 1)` -- the same
/// zero-period guard as the idle percentage, as policy.
pub fn build_summary(
    gateway: &Gateway,
    stats: GatewayStats,
    period_seconds: u32,
) -> AnalysisSummary {
    let total_bytes = stats.traffic.bytes_in + stats.traffic.bytes_out;
    let total_packets = stats.traffic.packets_in + stats.traffic.packets_out;

    let seconds = (stats.total_periods * u64::from(period_seconds)).max(1) as f64;

    AnalysisSummary {
        gateway_id: gateway.id.clone(),
        gateway_name: gateway.name.clone(),
        kind: gateway.kind,
        network_id: gateway.network_id.clone(),
        network_name: gateway.network_name.clone(),

        total_periods: stats.total_periods,
        idle_periods: stats.idle_periods,
        idle_percentage: stats.idle_percentage,

        traffic: stats.traffic,
        total_bytes,
        total_packets,
        bytes_per_second_avg: round2(total_bytes / seconds),
        packets_per_second_avg: round2(total_packets / seconds),

        kind_totals: stats.kind_totals,
    }
}
