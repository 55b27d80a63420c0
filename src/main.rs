// src/main.rs
use anyhow::Result;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use load_balancer_listener::{config::ListenerConfig, server::bootstrap};

const DEFAULT_LOG_FILTER: &str = "load_balancer_listener=info";

// The runtime only hosts main for now; an accept loop will run on it.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Initialize tracing; RUST_LOG wins over the default filter
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_FILTER)?,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .init();

    let config = ListenerConfig::default();
    debug!("Starting load balancer listener on {}", config.socket_addr());

    match bootstrap(config) {
        Ok(endpoint) => {
            // Stays open until process teardown; nothing accepts on it yet.
            std::mem::forget(endpoint);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("{}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}
