// Wire types for the telemetry endpoint
//
// These mirror the endpoint's JSON shapes verbatim. Domain concerns
// (kind parsing, display-name fallback, traffic classification) live in
// `gatewatch-core::convert`, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A key/value resource tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// A gateway's attachment to a network (IGW records carry these instead
/// of a direct `network_id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub network_id: Option<String>,
}

/// One gateway as enumerated by the endpoint.
///
/// `kind` is the raw discriminator string (`"nat"` / `"igw"`); NAT
/// records carry `network_id` directly, IGW records link through
/// `attachments`, matching the provider's own asymmetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRecord {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A network (VPC) record, fetched to resolve a display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub id: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Account identity the endpoint is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_id: String,
}

/// One aggregated observation for a (gateway, metric) pair.
///
/// Statistics the upstream system did not report default to zero, so a
/// sparse datapoint never turns into a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub sum: f64,
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub maximum: f64,
    #[serde(default)]
    pub minimum: f64,
}

/// Existence-probe payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricPresence {
    pub exists: bool,
}
