//! Capability traits the engine consumes from its environment.
//!
//! The engine treats the provider as opaque: a datapoint fetch per
//! window, an existence probe, and gateway enumeration. `provider.rs`
//! implements these for [`gatewatch_api::TelemetryClient`]; tests use
//! in-memory fakes.

use std::future::Future;

use gatewatch_api::{Datapoint, GatewayRecord, NetworkRecord};

use crate::model::{GatewayKind, TimeRange};

/// Metric-fetch capability: raw datapoints for one (gateway, metric)
/// pair over one fetch window, plus the existence probe used for the
/// IGW zero-fill policy.
///
/// Each call is individually fallible; retry policy belongs to the
/// implementation, never to the engine.
pub trait MetricsSource: Send + Sync {
    /// Fetch datapoints for `[window.start, window.end)` at the given
    /// period granularity.
    fn fetch(
        &self,
        gateway_id: &str,
        metric: &str,
        window: TimeRange,
        period_seconds: u32,
    ) -> impl Future<Output = Result<Vec<Datapoint>, gatewatch_api::Error>> + Send;

    /// Whether the metric has any data at all for this gateway.
    fn exists(
        &self,
        gateway_id: &str,
        metric: &str,
    ) -> impl Future<Output = Result<bool, gatewatch_api::Error>> + Send;
}

/// Gateway-enumeration capability.
pub trait GatewayDiscovery: Send + Sync {
    /// Enumerate gateways, optionally restricted to one family.
    fn list_gateways(
        &self,
        kind: Option<GatewayKind>,
    ) -> impl Future<Output = Result<Vec<GatewayRecord>, gatewatch_api::Error>> + Send;

    /// Look up a network record for display-name resolution.
    fn describe_network(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<NetworkRecord, gatewatch_api::Error>> + Send;

    /// The account identity the data is scoped to.
    fn account_id(&self) -> impl Future<Output = Result<String, gatewatch_api::Error>> + Send;
}
