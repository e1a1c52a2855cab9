//! Traffic/idle aggregator.
//!
//! Consumes one gateway's flat sample table and computes distinct
//! observation periods, idle periods, idle percentage, and the grouped
//! sums configured in [`crate::catalog`]. One O(samples) pass builds a
//! per-timestamp view; no repeated full-table filtering.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::catalog::{self, SumField};
use crate::model::{
    Gateway, GatewayKind, GatewayStats, GatewayStatus, KindTotals, MetricSample, TrafficTotals,
};

/// Round to two decimal places, the precision of every reported
/// percentage and rate.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-timestamp idle bookkeeping.
#[derive(Debug, Clone, Copy)]
struct PeriodFlags {
    /// At least one traffic-classified metric was observed here.
    saw_traffic: bool,
    /// Every observed traffic metric summed to zero.
    traffic_all_zero: bool,
}

/// Compute per-gateway statistics from its sample table.
///
/// Only samples whose metric belongs to the gateway's kind catalog feed
/// the grouped sums; a metric entirely absent from the table contributes
/// zero, never an error.
pub fn aggregate(gateway: &Gateway, samples: &[MetricSample]) -> GatewayStats {
    // metric name → summary field, from the per-kind grouping table.
    let field_of: HashMap<&str, SumField> = catalog::sum_groups(gateway.kind)
        .iter()
        .flat_map(|group| group.metrics.iter().map(|m| (*m, group.field)))
        .collect();

    let mut periods: BTreeMap<DateTime<Utc>, PeriodFlags> = BTreeMap::new();
    let mut sums: HashMap<SumField, f64> = HashMap::new();
    let mut any_nonzero = false;

    // ActiveConnectionCount is summarized from its own maxima/averages,
    // not a re-derived sum.
    let mut active_conn_max: Option<f64> = None;
    let mut active_conn_avg_total = 0.0;
    let mut active_conn_count: u64 = 0;

    for sample in samples.iter().filter(|s| s.gateway_id == gateway.id) {
        let flags = periods.entry(sample.timestamp).or_insert(PeriodFlags {
            saw_traffic: false,
            traffic_all_zero: true,
        });

        if catalog::is_traffic_metric(&sample.metric) {
            flags.saw_traffic = true;
            if sample.sum != 0.0 {
                flags.traffic_all_zero = false;
            }
        }

        if sample.sum != 0.0 {
            any_nonzero = true;
        }

        if let Some(field) = field_of.get(sample.metric.as_str()) {
            *sums.entry(*field).or_insert(0.0) += sample.sum;
        }

        if sample.metric == catalog::ACTIVE_CONNECTION_COUNT {
            active_conn_max = Some(active_conn_max.map_or(sample.maximum, |m: f64| m.max(sample.maximum)));
            active_conn_avg_total += sample.average;
            active_conn_count += 1;
        }
    }

    let total_periods = periods.len() as u64;
    let idle_periods = periods
        .values()
        .filter(|f| f.saw_traffic && f.traffic_all_zero)
        .count() as u64;

    // Policy, not mathematical necessity: an empty table reports 0%
    // idle rather than dividing by zero.
    let idle_percentage = if total_periods > 0 {
        round2(idle_periods as f64 / total_periods as f64 * 100.0)
    } else {
        0.0
    };

    let sum_of = |field: SumField| sums.get(&field).copied().unwrap_or(0.0);

    let traffic = TrafficTotals {
        bytes_in: sum_of(SumField::BytesIn),
        bytes_out: sum_of(SumField::BytesOut),
        packets_in: sum_of(SumField::PacketsIn),
        packets_out: sum_of(SumField::PacketsOut),
    };

    let kind_totals = match gateway.kind {
        GatewayKind::Nat => KindTotals::Nat {
            connection_attempts: sum_of(SumField::ConnectionAttempts),
            connection_timeouts: sum_of(SumField::ConnectionTimeouts),
            port_allocation_errors: sum_of(SumField::PortAllocationErrors),
            max_active_connections: active_conn_max.unwrap_or(0.0),
            avg_active_connections: if active_conn_count > 0 {
                active_conn_avg_total / active_conn_count as f64
            } else {
                0.0
            },
        },
        GatewayKind::Igw => KindTotals::Igw {
            blackhole_drop_bytes: sum_of(SumField::BlackholeDropBytes),
            no_route_drop_bytes: sum_of(SumField::NoRouteDropBytes),
            blackhole_drop_packets: sum_of(SumField::BlackholeDropPackets),
            no_route_drop_packets: sum_of(SumField::NoRouteDropPackets),
            // All-or-nothing over the entire sample set, traffic and
            // drop counters alike.
            status: if any_nonzero {
                GatewayStatus::Active
            } else {
                GatewayStatus::Inactive
            },
        },
    };

    GatewayStats {
        total_periods,
        idle_periods,
        idle_percentage,
        traffic,
        kind_totals,
    }
}
