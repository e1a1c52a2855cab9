//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use gatewatch_core::CoreError;

/// Exit codes.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the telemetry endpoint at {url}")]
    #[diagnostic(
        code(gatewatch::connection_failed),
        help(
            "Check that the endpoint is running and accessible.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(gatewatch::timeout),
        help("Increase timeout with --timeout or check endpoint responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(gatewatch::auth_failed),
        help(
            "Verify your bearer token.\n\
             Set it via --token, GATEWATCH_TOKEN, or the profile's token field."
        )
    )]
    AuthFailed { message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No telemetry endpoint configured")]
    #[diagnostic(
        code(gatewatch::no_endpoint),
        help(
            "Pass --endpoint (-e), set GATEWATCH_ENDPOINT, or add an endpoint\n\
             to a profile in the config file.\n\
             Expected at: {path}"
        )
    )]
    NoEndpoint { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(gatewatch::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(gatewatch::config))]
    Config(Box<figment::Error>),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gatewatch::validation))]
    Validation { field: String, reason: String },

    // ── Analysis ─────────────────────────────────────────────────────

    #[error("Gateway discovery failed: {message}")]
    #[diagnostic(
        code(gatewatch::discovery),
        help("Re-run with -v for the underlying endpoint error.")
    )]
    Discovery { message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(gatewatch::api_error))]
    ApiError { message: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not serialize output: {0}")]
    #[diagnostic(code(gatewatch::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not render configuration: {0}")]
    #[diagnostic(code(gatewatch::toml))]
    Toml(#[from] toml::ser::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NoEndpoint { .. }
            | Self::ProfileNotFound { .. }
            | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidRange { start, end } => CliError::Validation {
                field: "days".into(),
                reason: format!("end {end} precedes start {start}"),
            },

            CoreError::InvalidChunkDuration => CliError::Validation {
                field: "chunk".into(),
                reason: "must be positive".into(),
            },

            CoreError::UnknownKind { kind } => CliError::Validation {
                field: "kind".into(),
                reason: format!("unknown gateway kind '{kind}'"),
            },

            CoreError::Discovery(source) => match source {
                gatewatch_api::Error::Authentication { message } => {
                    CliError::AuthFailed { message }
                }
                gatewatch_api::Error::Transport(ref e) if e.is_connect() => {
                    CliError::ConnectionFailed {
                        url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                        source: source.to_string().into(),
                    }
                }
                other => CliError::Discovery {
                    message: other.to_string(),
                },
            },

            err @ (CoreError::Fetch { .. } | CoreError::Probe { .. }) => CliError::ApiError {
                message: err.to_string(),
            },
        }
    }
}
