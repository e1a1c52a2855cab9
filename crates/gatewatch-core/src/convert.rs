//! Wire-to-domain conversion: the single boundary where api records
//! become [`Gateway`] values.
//!
//! Display-name resolution follows the provider's conventions: the
//! `Name` tag wins; otherwise the owning network's name (itself the
//! network's `Name` tag, falling back to the network id) prefixed with
//! the family; otherwise the bare gateway id. A failed network lookup
//! degrades to the network id with a warning -- discovery never fails
//! over a missing display name.

use std::collections::HashMap;

use gatewatch_api::{GatewayRecord, Tag};
use tracing::warn;

use crate::error::CoreError;
use crate::model::{Gateway, GatewayKind};
use crate::source::GatewayDiscovery;

/// The `Name` tag value, if present.
fn name_tag(tags: &[Tag]) -> Option<String> {
    tags.iter()
        .find(|t| t.key == "Name")
        .map(|t| t.value.clone())
}

/// A gateway's owning network: NAT records carry it directly, IGW
/// records link through their first attachment.
fn network_id_of(record: &GatewayRecord) -> Option<String> {
    record
        .network_id
        .clone()
        .or_else(|| record.attachments.first().and_then(|a| a.network_id.clone()))
}

/// Resolve the display name with the tag → network → id fallback chain.
fn display_name(record: &GatewayRecord, kind: GatewayKind, network_name: Option<&str>) -> String {
    if let Some(name) = name_tag(&record.tags) {
        return name;
    }
    match network_name {
        Some(n) => format!("{kind}-{n}"),
        None => record.id.clone(),
    }
}

/// Enumerate gateways and resolve their identity fields.
///
/// Network names are looked up once per network and cached for the
/// scan. An unknown kind string aborts discovery -- it is a usage
/// error, not a record to skip silently.
pub async fn discover_gateways<D: GatewayDiscovery>(
    discovery: &D,
    kind_filter: Option<GatewayKind>,
) -> Result<Vec<Gateway>, CoreError> {
    let records = discovery
        .list_gateways(kind_filter)
        .await
        .map_err(CoreError::Discovery)?;

    let mut network_names: HashMap<String, String> = HashMap::new();
    let mut gateways = Vec::with_capacity(records.len());

    for record in records {
        let kind = GatewayKind::from_wire(&record.kind)?;
        let network_id = network_id_of(&record);

        let network_name = match &network_id {
            Some(id) => Some(match network_names.get(id) {
                Some(name) => name.clone(),
                None => {
                    let name = resolve_network_name(discovery, id).await;
                    network_names.insert(id.clone(), name.clone());
                    name
                }
            }),
            None => None,
        };

        let name = display_name(&record, kind, network_name.as_deref());
        gateways.push(Gateway {
            id: record.id,
            kind,
            name,
            network_id,
            network_name,
        });
    }

    Ok(gateways)
}

/// The network's `Name` tag, degrading to its id on a missing tag or a
/// failed lookup.
async fn resolve_network_name<D: GatewayDiscovery>(discovery: &D, network_id: &str) -> String {
    match discovery.describe_network(network_id).await {
        Ok(network) => name_tag(&network.tags).unwrap_or_else(|| network_id.to_owned()),
        Err(err) => {
            warn!(network_id, %err, "network lookup failed, using id");
            network_id.to_owned()
        }
    }
}

/// The account identity, degrading to `"unknown"` when the endpoint
/// cannot answer.
pub async fn resolve_account_id<D: GatewayDiscovery>(discovery: &D) -> String {
    match discovery.account_id().await {
        Ok(id) => id,
        Err(err) => {
            warn!(%err, "could not resolve account id");
            "unknown".to_owned()
        }
    }
}
