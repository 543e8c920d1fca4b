//! Gateway server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p bridge-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use bridge_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Gateway failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    // Initialize tracing for the configured environment
    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(&config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.gateway.port,
        "Configuration loaded"
    );

    // Run the gateway server
    bridge_gateway::run(config).await?;

    Ok(())
}
