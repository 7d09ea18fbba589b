use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use librato_snapshots::{LibratoClient, LibratoConfig};

mod commands;

/// Default log levels: the library and this binary log under different targets
const LOG_DIRECTIVES: &[&str] = &[
    "librato_snapshots=info",
    concat!(env!("CARGO_CRATE_NAME"), "=info"),
];

fn build_filter(mut filter: EnvFilter) -> EnvFilter {
    for raw in LOG_DIRECTIVES {
        if let Ok(directive) = raw.parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(EnvFilter::from_default_env()))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if commands::wants_help(&args) {
        return match commands::help::execute() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    let config = match LibratoConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match LibratoClient::new(&config) {
        Ok(c) => {
            info!("Using Librato API at {}", c.base_url());
            c
        }
        Err(e) => {
            error!("Failed to create Librato client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = commands::handle_args(&client, &args).await {
        error!("❌ {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
