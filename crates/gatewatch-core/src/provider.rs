// ── Capability impls for the telemetry client ──
//
// `TelemetryClient` is the production implementation of both engine
// capabilities. Tests substitute in-memory fakes through the same
// traits.

use gatewatch_api::{Datapoint, GatewayRecord, NetworkRecord, TelemetryClient};

use crate::model::{GatewayKind, TimeRange};
use crate::source::{GatewayDiscovery, MetricsSource};

impl MetricsSource for TelemetryClient {
    async fn fetch(
        &self,
        gateway_id: &str,
        metric: &str,
        window: TimeRange,
        period_seconds: u32,
    ) -> Result<Vec<Datapoint>, gatewatch_api::Error> {
        self.fetch_datapoints(gateway_id, metric, window.start(), window.end(), period_seconds)
            .await
    }

    async fn exists(
        &self,
        gateway_id: &str,
        metric: &str,
    ) -> Result<bool, gatewatch_api::Error> {
        self.metric_exists(gateway_id, metric).await
    }
}

impl GatewayDiscovery for TelemetryClient {
    async fn list_gateways(
        &self,
        kind: Option<GatewayKind>,
    ) -> Result<Vec<GatewayRecord>, gatewatch_api::Error> {
        let wire_kind = kind.map(|k| match k {
            GatewayKind::Nat => "nat",
            GatewayKind::Igw => "igw",
        });
        TelemetryClient::list_gateways(self, wire_kind).await
    }

    async fn describe_network(
        &self,
        network_id: &str,
    ) -> Result<NetworkRecord, gatewatch_api::Error> {
        TelemetryClient::describe_network(self, network_id).await
    }

    async fn account_id(&self) -> Result<String, gatewatch_api::Error> {
        Ok(self.get_account().await?.account_id)
    }
}
