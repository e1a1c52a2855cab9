// HTTP transport configuration
//
// Shared knobs for building the underlying `reqwest::Client`. Kept
// separate from `TelemetryClient` so the CLI can translate its flags
// (timeout, --insecure, token) without knowing reqwest.

use std::time::Duration;

use crate::error::Error;

/// Transport-level configuration for the telemetry client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept self-signed or otherwise invalid TLS certificates.
    pub danger_accept_invalid_certs: bool,
    /// Bearer token sent as `Authorization: Bearer <token>` when set.
    pub bearer_token: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            danger_accept_invalid_certs: false,
            bearer_token: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this configuration.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .build()?;
        Ok(client)
    }
}
