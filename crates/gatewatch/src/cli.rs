//! Clap derive structures for the `gatewatch` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gatewatch -- idle-usage diagnostics for network gateways
#[derive(Debug, Parser)]
#[command(
    name = "gatewatch",
    version,
    about = "Detect idle NAT and Internet gateways from traffic metrics",
    long_about = "Analyzes periodic traffic and error counters over a lookback window\n\
        and reports per-gateway idle percentage and traffic volume, leaving\n\
        any decommission decision to the operator.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Endpoint profile to use
    #[arg(long, short = 'p', env = "GATEWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Telemetry endpoint URL (overrides profile)
    #[arg(long, short = 'e', env = "GATEWATCH_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Region the analysis is scoped to
    #[arg(long, env = "GATEWATCH_REGION", global = true)]
    pub region: Option<String>,

    /// Bearer token for the telemetry endpoint
    #[arg(long, env = "GATEWATCH_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GATEWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "GATEWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "GATEWATCH_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Gateway family filter.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Nat,
    Igw,
}

impl From<KindArg> for gatewatch_core::GatewayKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Nat => Self::Nat,
            KindArg::Igw => Self::Igw,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the idle-usage analysis
    #[command(alias = "an", alias = "a")]
    Analyze(AnalyzeArgs),

    /// Enumerate gateways without analyzing them
    #[command(alias = "gw")]
    Gateways(GatewaysArgs),

    /// Inspect the configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Analyze ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Number of days to look back
    #[arg(long, default_value = "90")]
    pub days: u32,

    /// Restrict the analysis to one gateway family
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Write the full report (summaries + sample table) as JSON; a
    /// timestamped file name is generated when PATH is omitted
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub report: Option<Option<PathBuf>>,

    /// How many gateways to analyze concurrently
    #[arg(long, default_value = "4")]
    pub concurrency: usize,
}

// ── Gateways ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GatewaysArgs {
    #[command(subcommand)]
    pub command: GatewaysCommand,
}

#[derive(Debug, Subcommand)]
pub enum GatewaysCommand {
    /// List discovered gateways
    #[command(alias = "ls")]
    List(GatewaysListArgs),
}

#[derive(Debug, Args)]
pub struct GatewaysListArgs {
    /// Restrict the listing to one gateway family
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the configuration file path
    Path,
    /// Show the resolved configuration (tokens redacted)
    Show,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
