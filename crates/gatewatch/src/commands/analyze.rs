//! Analysis command handler: discovery, the engine run, rendering, and
//! the optional JSON report artifact.

use std::fs::File;
use std::io::BufWriter;

use owo_colors::OwoColorize;
use tabled::Tabled;

use gatewatch_api::TelemetryClient;
use gatewatch_core::{
    discover_gateways, resolve_account_id, AnalysisReport, AnalysisScope, AnalysisSummary,
    Analyzer, AnalyzerOptions, GatewayStatus, KindTotals,
};

use crate::cli::{AnalyzeArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Periods")]
    periods: u64,
    #[tabled(rename = "Idle %")]
    idle: String,
    #[tabled(rename = "Bytes In")]
    bytes_in: String,
    #[tabled(rename = "Bytes Out")]
    bytes_out: String,
    #[tabled(rename = "B/s")]
    rate: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&AnalysisSummary> for SummaryRow {
    fn from(s: &AnalysisSummary) -> Self {
        Self {
            kind: s.kind.to_string(),
            id: s.gateway_id.clone(),
            name: s.gateway_name.clone(),
            network: s.network_name.clone().unwrap_or_default(),
            periods: s.total_periods,
            idle: format!("{:.2}%", s.idle_percentage),
            bytes_in: format!("{:.0}", s.traffic.bytes_in),
            bytes_out: format!("{:.0}", s.traffic.bytes_out),
            rate: format!("{:.2}", s.bytes_per_second_avg),
            status: match s.kind_totals {
                KindTotals::Igw { status, .. } => status.to_string(),
                KindTotals::Nat { .. } => "-".into(),
            },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: TelemetryClient,
    args: AnalyzeArgs,
    global: &GlobalOpts,
    region: String,
) -> Result<(), CliError> {
    let account_id = resolve_account_id(&client).await;
    let gateways = discover_gateways(&client, args.kind.map(Into::into)).await?;

    if gateways.is_empty() {
        output::print_output("No gateways found.", global.quiet);
        return Ok(());
    }

    let analyzer = Analyzer::with_options(
        client,
        AnalyzerOptions {
            concurrency: args.concurrency,
            ..AnalyzerOptions::default()
        },
    );
    let scope = AnalysisScope { account_id, region };
    let report = analyzer.analyze_lookback(scope, &gateways, args.days).await;

    // Per-gateway failures are non-fatal: surface them, keep the rest.
    for failure in &report.failures {
        eprintln!(
            "warning: analysis failed for {} ({}): {}",
            failure.gateway_name, failure.gateway_id, failure.error
        );
    }

    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        println!(
            "Gateway analysis -- account {} | region {} | {} to {}",
            report.scope.account_id,
            report.scope.region,
            report.range.start().format("%Y-%m-%d"),
            report.range.end().format("%Y-%m-%d"),
        );
    }

    let out = output::render_list(
        &global.output,
        &report.summaries,
        |s| SummaryRow::from(s),
        |s| s.gateway_id.clone(),
    );
    output::print_output(&out, global.quiet);

    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        let color = output::should_color(&global.color);
        for summary in &report.summaries {
            println!("{}", render_detail(summary, color));
        }
    }

    if let Some(path_arg) = args.report {
        let path = path_arg.unwrap_or_else(|| default_report_path(&report.scope));
        write_report(&report, &path)?;
        output::print_output(
            &format!("Detailed analysis saved to: {}", path.display()),
            global.quiet,
        );
    }

    Ok(())
}

/// `gateway_analysis_<account>_<region>_<timestamp>.json`, next to the
/// working directory, when `--report` is given without a path.
fn default_report_path(scope: &AnalysisScope) -> std::path::PathBuf {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    std::path::PathBuf::from(format!(
        "gateway_analysis_{}_{}_{ts}.json",
        scope.account_id, scope.region
    ))
}

/// Serialize the full report (summaries + flat sample table) as JSON.
fn write_report(report: &AnalysisReport, path: &std::path::Path) -> Result<(), CliError> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Human-readable per-gateway rundown, printed under the table.
fn render_detail(summary: &AnalysisSummary, color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} Gateway: {} ({})",
        summary.kind, summary.gateway_name, summary.gateway_id
    ));
    if let Some(ref network) = summary.network_name {
        lines.push(format!(
            "  Network: {} ({})",
            network,
            summary.network_id.as_deref().unwrap_or("-")
        ));
    }
    lines.push(format!(
        "  Idle: {:.2}% ({} of {} periods)",
        summary.idle_percentage, summary.idle_periods, summary.total_periods
    ));
    lines.push(format!(
        "  Traffic: {:.0} bytes in / {:.0} bytes out ({:.2} B/s avg)",
        summary.traffic.bytes_in, summary.traffic.bytes_out, summary.bytes_per_second_avg
    ));
    lines.push(format!(
        "  Packets: {:.0} in / {:.0} out ({:.2} pkt/s avg)",
        summary.traffic.packets_in, summary.traffic.packets_out, summary.packets_per_second_avg
    ));

    match summary.kind_totals {
        KindTotals::Nat {
            connection_attempts,
            connection_timeouts,
            port_allocation_errors,
            max_active_connections,
            avg_active_connections,
        } => {
            lines.push(format!(
                "  Connections: {connection_attempts:.0} attempts, \
                 {connection_timeouts:.0} timeouts, {port_allocation_errors:.0} port errors"
            ));
            lines.push(format!(
                "  Active connections: max {max_active_connections:.0}, avg {avg_active_connections:.2}"
            ));
        }
        KindTotals::Igw {
            blackhole_drop_bytes,
            no_route_drop_bytes,
            status,
            ..
        } => {
            let status_str = if color {
                match status {
                    GatewayStatus::Active => status.to_string().green().to_string(),
                    GatewayStatus::Inactive => status.to_string().red().to_string(),
                }
            } else {
                status.to_string()
            };
            lines.push(format!("  Status: {status_str}"));
            lines.push(format!(
                "  Drops: {blackhole_drop_bytes:.0} blackhole bytes, \
                 {no_route_drop_bytes:.0} no-route bytes"
            ));
        }
    }

    lines.join("\n")
}
