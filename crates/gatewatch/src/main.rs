mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gatewatch_api::TelemetryClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need an endpoint
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "gatewatch", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the telemetry endpoint
        Command::Analyze(args) => {
            let (client, region) = build_client(&cli.global)?;
            commands::analyze::handle(client, args, &cli.global, region).await
        }
        Command::Gateways(args) => {
            let (client, _region) = build_client(&cli.global)?;
            commands::gateways::handle(&client, args, &cli.global).await
        }
    }
}

/// Build a `TelemetryClient` from the resolved endpoint configuration.
fn build_client(global: &cli::GlobalOpts) -> Result<(TelemetryClient, String), CliError> {
    let endpoint = config::resolve_endpoint(global)?;
    tracing::debug!(url = %endpoint.base_url, region = %endpoint.region, "using endpoint");

    let client = TelemetryClient::new(endpoint.base_url.clone(), &endpoint.transport)
        .map_err(|err| CliError::ConnectionFailed {
            url: endpoint.base_url.to_string(),
            source: err.to_string().into(),
        })?;
    Ok((client, endpoint.region))
}
