// ── Gateway domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;

/// The two gateway families under analysis.
///
/// The families are structurally different: NAT gateways report
/// source/destination-split traffic counters and connection-tracking
/// metrics, Internet gateways report destination-only traffic plus IPv4
/// drop counters. The kind is immutable once discovered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum GatewayKind {
    /// NAT gateway.
    #[strum(to_string = "NAT", serialize = "nat")]
    Nat,
    /// Internet gateway.
    #[strum(to_string = "IGW", serialize = "igw")]
    Igw,
}

impl GatewayKind {
    /// Parse the wire discriminator, surfacing unknown values as a usage
    /// error rather than a decode panic.
    pub fn from_wire(kind: &str) -> Result<Self, CoreError> {
        kind.parse().map_err(|_| CoreError::UnknownKind {
            kind: kind.to_owned(),
        })
    }
}

/// An entity under analysis. Identity is `id`.
///
/// Produced by discovery ([`crate::convert`]); consumed read-only by the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    pub id: String,
    pub kind: GatewayKind,
    /// Display name resolved from tags, with network-based fallback.
    pub name: String,
    /// Owning virtual network, when the provider reports one.
    pub network_id: Option<String>,
    pub network_name: Option<String>,
}
