//! Seed binary entry point
//!
//! Run with:
//! ```bash
//! DATABASE_URL=postgres://... SEED_APPLY_SCHEMA=true cargo run -p auth-seed
//! ```
//!
//! Configuration is read from environment variables (and `.env`). Exits with
//! status 1 when configuration, connection or any seed step fails; a second
//! run is expected to fail on the already existing `admin` account.

use auth_common::{init_tracing, try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(trace_err) = init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {trace_err}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(env = ?config.app.env, seed = ?config.seed, "Configuration loaded");

    match auth_seed::run(&config).await {
        Ok(report) => info!(%report, "Seeding finished"),
        Err(e) => {
            error!(error = %e, "Seeding failed");
            std::process::exit(1);
        }
    }
}
