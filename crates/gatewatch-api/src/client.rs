// Telemetry endpoint HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction and `{ data }`
// envelope unwrapping. All methods return unwrapped payloads -- the
// envelope is stripped before the caller sees it.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{AccountRecord, Datapoint, GatewayRecord, MetricPresence, NetworkRecord};

/// Success envelope: every endpoint response wraps its payload in `data`.
#[derive(serde::Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error envelope: non-2xx responses carry `{"error":{"message","code"}}`.
#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// HTTP client for the gateway telemetry endpoint.
pub struct TelemetryClient {
    http: reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl TelemetryClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` should be the endpoint root (e.g.
    /// `https://telemetry.internal`); API paths are joined under `/v1/`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            bearer_token: transport.bearer_token.clone(),
        })
    }

    /// Create a client around an existing `reqwest::Client` (test seam).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            bearer_token: None,
        }
    }

    /// Join an API path under the versioned prefix.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("v1/{path}"))?)
    }

    // ── Discovery ───────────────────────────────────────────────────

    /// Enumerate gateways, optionally filtered by kind (`"nat"` / `"igw"`).
    ///
    /// `GET /v1/gateways[?kind=...]`
    pub async fn list_gateways(&self, kind: Option<&str>) -> Result<Vec<GatewayRecord>, Error> {
        let mut url = self.api_url("gateways")?;
        if let Some(k) = kind {
            url.query_pairs_mut().append_pair("kind", k);
        }
        debug!(?kind, "listing gateways");
        self.get(url).await
    }

    /// Fetch one network record (for display-name resolution).
    ///
    /// `GET /v1/networks/{id}`
    pub async fn describe_network(&self, network_id: &str) -> Result<NetworkRecord, Error> {
        let url = self.api_url(&format!("networks/{network_id}"))?;
        debug!(network_id, "describing network");
        self.get(url).await
    }

    /// Fetch the account identity the endpoint is scoped to.
    ///
    /// `GET /v1/account`
    pub async fn get_account(&self) -> Result<AccountRecord, Error> {
        let url = self.api_url("account")?;
        self.get(url).await
    }

    // ── Metrics ─────────────────────────────────────────────────────

    /// Fetch datapoints for one (gateway, metric) pair over `[start, end)`.
    ///
    /// `GET /v1/gateways/{id}/metrics/{metric}/datapoints?start&end&period`
    ///
    /// The endpoint rejects overly long ranges; callers are expected to
    /// chunk the requested window (see `gatewatch-core::window`).
    pub async fn fetch_datapoints(
        &self,
        gateway_id: &str,
        metric: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_seconds: u32,
    ) -> Result<Vec<Datapoint>, Error> {
        let mut url = self.api_url(&format!("gateways/{gateway_id}/metrics/{metric}/datapoints"))?;
        url.query_pairs_mut()
            .append_pair("start", &start.to_rfc3339())
            .append_pair("end", &end.to_rfc3339())
            .append_pair("period", &period_seconds.to_string());
        debug!(gateway_id, metric, %start, %end, "fetching datapoints");
        self.get(url).await
    }

    /// Probe whether a metric has any data at all for a gateway.
    ///
    /// `GET /v1/gateways/{id}/metrics/{metric}`
    pub async fn metric_exists(&self, gateway_id: &str, metric: &str) -> Result<bool, Error> {
        let url = self.api_url(&format!("gateways/{gateway_id}/metrics/{metric}"))?;
        debug!(gateway_id, metric, "probing metric existence");
        let presence: MetricPresence = self.get(url).await?;
        Ok(presence.exists)
    }

    // ── Transport mechanics ─────────────────────────────────────────

    /// GET a URL, unwrap the `{ data }` envelope, and decode the payload.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let mut request = self.http.get(url);
        if let Some(ref token) = self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &body));
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;
        Ok(envelope.data)
    }

    /// Translate a non-2xx response into a structured error.
    fn api_error(status: u16, body: &str) -> Error {
        let parsed: Option<ErrorBody> = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error);
        let message = parsed
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| format!("HTTP {status}"));
        let code = parsed.and_then(|e| e.code);

        if status == 401 || status == 403 {
            return Error::Authentication { message };
        }
        Error::Api {
            message,
            code,
            status,
        }
    }
}
