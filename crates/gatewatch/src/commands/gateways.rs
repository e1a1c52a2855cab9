//! Gateway listing command handlers.

use tabled::Tabled;

use gatewatch_api::TelemetryClient;
use gatewatch_core::{discover_gateways, Gateway};

use crate::cli::{GatewaysArgs, GatewaysCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct GatewayRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Network")]
    network: String,
}

impl From<&Gateway> for GatewayRow {
    fn from(g: &Gateway) -> Self {
        Self {
            kind: g.kind.to_string(),
            id: g.id.clone(),
            name: g.name.clone(),
            network: match (&g.network_name, &g.network_id) {
                (Some(name), Some(id)) => format!("{name} ({id})"),
                (Some(name), None) => name.clone(),
                (None, Some(id)) => id.clone(),
                (None, None) => String::new(),
            },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &TelemetryClient,
    args: GatewaysArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        GatewaysCommand::List(list) => {
            let gateways = discover_gateways(client, list.kind.map(Into::into)).await?;
            let out = output::render_list(
                &global.output,
                &gateways,
                |g| GatewayRow::from(g),
                |g| g.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
