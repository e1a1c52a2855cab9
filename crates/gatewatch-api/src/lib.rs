//! Async client for the gateway telemetry endpoint.
//!
//! The endpoint exposes the provider-side data that `gatewatch-core`
//! consumes: gateway enumeration (with tags and network attachments),
//! per-metric datapoint series over a time window, a metric existence
//! probe, and account identity. Every response uses a `{ "data": ... }`
//! envelope; this crate strips it before callers see the payload.
//!
//! `gatewatch-core` maps these wire types into its domain model — nothing
//! here knows about idle periods or summaries.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::TelemetryClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{AccountRecord, Datapoint, GatewayRecord, NetworkRecord, Tag};
