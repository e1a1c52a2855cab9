//! Static metric catalogs and grouping tables.
//!
//! Each gateway family has a fixed, ordered set of metric names; a metric
//! outside the family's catalog is never requested nor aggregated. The
//! grouping tables map summary fields to the source metrics they sum
//! over, so the aggregation loop itself is family-agnostic.

use crate::model::GatewayKind;

/// Upstream reporting granularity: 6 hours. All idle/traffic arithmetic
/// is expressed in whole periods of this length.
pub const PERIOD_SECONDS: u32 = 21_600;

/// Maximum fetch-window length accepted by the upstream metrics API.
pub const MAX_CHUNK_DAYS: i64 = 30;

/// NAT gateway metric catalog.
pub const NAT_METRICS: [&str; 14] = [
    "BytesInFromDestination",
    "BytesInFromSource",
    "BytesOutToDestination",
    "BytesOutToSource",
    "PacketsInFromDestination",
    "PacketsInFromSource",
    "PacketsOutToDestination",
    "PacketsOutToSource",
    "ConnectionAttemptCount",
    "ConnectionEstablishedCount",
    "ErrorPortAllocation",
    "IdleTimeoutCount",
    "ActiveConnectionCount",
    "ConnectionEstablishedRate",
];

/// Internet gateway metric catalog. IGW traffic has no "source"
/// direction, so only the destination-side counters exist.
pub const IGW_METRICS: [&str; 8] = [
    "BytesInFromDestination",
    "BytesOutToDestination",
    "PacketsInFromDestination",
    "PacketsOutToDestination",
    "BytesDropCountBlackholeIPv4",
    "BytesDropCountNoRouteIPv4",
    "PacketsDropCountBlackholeIPv4",
    "PacketsDropCountNoRouteIPv4",
];

/// Summarized separately from the grouped sums: the aggregator takes the
/// peak of this metric's maxima and the mean of its averages, not a
/// re-derived sum.
pub const ACTIVE_CONNECTION_COUNT: &str = "ActiveConnectionCount";

/// The ordered metric catalog for a gateway family.
pub fn metric_names(kind: GatewayKind) -> &'static [&'static str] {
    match kind {
        GatewayKind::Nat => &NAT_METRICS,
        GatewayKind::Igw => &IGW_METRICS,
    }
}

/// Traffic classification: any byte or packet counter. Idle-period
/// detection is judged over these metrics only.
pub fn is_traffic_metric(name: &str) -> bool {
    name.contains("Bytes") || name.contains("Packets")
}

// ── Grouped-sum configuration ───────────────────────────────────────

/// Output fields fed by summing `sum` over one or more source metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SumField {
    BytesIn,
    BytesOut,
    PacketsIn,
    PacketsOut,
    ConnectionAttempts,
    ConnectionTimeouts,
    PortAllocationErrors,
    BlackholeDropBytes,
    NoRouteDropBytes,
    BlackholeDropPackets,
    NoRouteDropPackets,
}

/// One summary field and the source metrics it sums over.
#[derive(Debug, Clone, Copy)]
pub struct SumGroup {
    pub field: SumField,
    pub metrics: &'static [&'static str],
}

/// NAT traffic merges the source- and destination-side counters per
/// direction; connection counters are single-metric raw sums.
const NAT_SUM_GROUPS: [SumGroup; 7] = [
    SumGroup {
        field: SumField::BytesIn,
        metrics: &["BytesInFromSource", "BytesInFromDestination"],
    },
    SumGroup {
        field: SumField::BytesOut,
        metrics: &["BytesOutToSource", "BytesOutToDestination"],
    },
    SumGroup {
        field: SumField::PacketsIn,
        metrics: &["PacketsInFromSource", "PacketsInFromDestination"],
    },
    SumGroup {
        field: SumField::PacketsOut,
        metrics: &["PacketsOutToSource", "PacketsOutToDestination"],
    },
    SumGroup {
        field: SumField::ConnectionAttempts,
        metrics: &["ConnectionAttemptCount"],
    },
    SumGroup {
        field: SumField::ConnectionTimeouts,
        metrics: &["IdleTimeoutCount"],
    },
    SumGroup {
        field: SumField::PortAllocationErrors,
        metrics: &["ErrorPortAllocation"],
    },
];

const IGW_SUM_GROUPS: [SumGroup; 8] = [
    SumGroup {
        field: SumField::BytesIn,
        metrics: &["BytesInFromDestination"],
    },
    SumGroup {
        field: SumField::BytesOut,
        metrics: &["BytesOutToDestination"],
    },
    SumGroup {
        field: SumField::PacketsIn,
        metrics: &["PacketsInFromDestination"],
    },
    SumGroup {
        field: SumField::PacketsOut,
        metrics: &["PacketsOutToDestination"],
    },
    SumGroup {
        field: SumField::BlackholeDropBytes,
        metrics: &["BytesDropCountBlackholeIPv4"],
    },
    SumGroup {
        field: SumField::NoRouteDropBytes,
        metrics: &["BytesDropCountNoRouteIPv4"],
    },
    SumGroup {
        field: SumField::BlackholeDropPackets,
        metrics: &["PacketsDropCountBlackholeIPv4"],
    },
    SumGroup {
        field: SumField::NoRouteDropPackets,
        metrics: &["PacketsDropCountNoRouteIPv4"],
    },
];

/// The grouped-sum table for a gateway family.
pub fn sum_groups(kind: GatewayKind) -> &'static [SumGroup] {
    match kind {
        GatewayKind::Nat => &NAT_SUM_GROUPS,
        GatewayKind::Igw => &IGW_SUM_GROUPS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_have_expected_sizes() {
        assert_eq!(metric_names(GatewayKind::Nat).len(), 14);
        assert_eq!(metric_names(GatewayKind::Igw).len(), 8);
    }

    #[test]
    fn traffic_classification() {
        assert!(is_traffic_metric("BytesInFromSource"));
        assert!(is_traffic_metric("PacketsDropCountNoRouteIPv4"));
        assert!(!is_traffic_metric("ConnectionAttemptCount"));
        assert!(!is_traffic_metric("ActiveConnectionCount"));
    }

    #[test]
    fn sum_group_metrics_belong_to_their_catalog() {
        for kind in [GatewayKind::Nat, GatewayKind::Igw] {
            let catalog = metric_names(kind);
            for group in sum_groups(kind) {
                for metric in group.metrics {
                    assert!(
                        catalog.contains(metric),
                        "{metric} not in {kind} catalog"
                    );
                }
            }
        }
    }
}
