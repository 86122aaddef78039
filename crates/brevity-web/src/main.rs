//! Brevity server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p brevity-web
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use brevity_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration before tracing so the log format can follow APP_ENV
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if try_init_tracing().is_ok() {
                error!(error = %e, "Failed to load configuration");
            } else {
                eprintln!("Failed to load configuration: {e}");
            }
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        "Configuration loaded"
    );

    if let Err(e) = brevity_web::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
