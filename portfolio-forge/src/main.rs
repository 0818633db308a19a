use anyhow::Result;
use clap::Parser;
use portfolio_forge::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing for the process.
    tracing_subscriber::fmt::init();
    tracing::info!("Application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    tracing::info!("CLI arguments parsed, invoking run");
    let result = run(cli).await;
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!(error = %e, "Command exited with error"),
    }
    result
}
