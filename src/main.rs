//! # Group Planner
//!
//! Backend for planning groups: groups, memberships with per-group
//! nicknames, and invite links.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - In-memory storage
//! - HTTP server

use anyhow::Result;
use tracing::info;

use group_planner::config::Settings;
use group_planner::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    group_planner::telemetry::init_tracing();

    info!("Starting Group Planner...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
