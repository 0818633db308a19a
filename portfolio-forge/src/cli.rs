/// This module implements the full CLI interface for portfolio-forge —
/// command parsing, argument validation and the async entrypoints for both
/// the HTTP front door and one-shot generation.
///
/// All core business logic (the pipeline, publishing, deployment polling)
/// lives in the `portfolio-forge-core` crate. This module is strictly CLI
/// glue: it validates the environment, builds the real clients once and
/// hands them to the server or the pipeline.
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use portfolio_forge_core::pipeline::PipelineResult;

use crate::config::{AppConfig, Credentials};
use crate::gemini::GeminiFormatter;
use crate::github::GithubClient;
use crate::payload::sanitize_embedded_assets;
use crate::server::{self, AppState};
use crate::templates::TemplateDirs;
use crate::vercel::VercelClient;

/// CLI for portfolio-forge: generate, publish and deploy portfolio sites.
#[derive(Parser)]
#[clap(
    name = "portfolio-forge",
    version,
    about = "Generate a portfolio site from raw user data, publish it to GitHub and deploy it on Vercel"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP front door
    Serve {
        #[clap(long, default_value_t = 5000)]
        port: u16,
        /// Directory holding the base/ and developer/ template sets
        #[clap(long, default_value = "templates")]
        templates: PathBuf,
    },
    /// Run the pipeline once for a JSON input file and print the result
    Generate {
        /// Path to a JSON file with the raw user data
        #[clap(long)]
        input: PathBuf,
        /// Directory holding the base/ and developer/ template sets
        #[clap(long, default_value = "templates")]
        templates: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Serve { port, templates } => {
            let state = build_state(templates)?;
            tracing::info!(port, "Starting HTTP front door");
            server::serve(state, port).await
        }
        Commands::Generate { input, templates } => generate(input, templates).await,
    }
}

/// Validate the environment and construct the shared state. Missing
/// credentials are fatal here, before anything binds or calls out.
fn build_state(templates: PathBuf) -> Result<Arc<AppState>> {
    let config = AppConfig::from_env();
    let credentials = config
        .validate()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(Arc::new(state_from_credentials(credentials, templates)))
}

fn state_from_credentials(credentials: Credentials, templates: PathBuf) -> AppState {
    AppState {
        formatter: GeminiFormatter::new(&credentials.gemini),
        repo_host: GithubClient::new(&credentials.github),
        deploy_host: VercelClient::new(&credentials.vercel),
        templates: TemplateDirs::new(&templates),
    }
}

async fn generate(input: PathBuf, templates: PathBuf) -> Result<()> {
    let raw = fs::read_to_string(&input)
        .map_err(|e| anyhow::anyhow!("failed to read input file {}: {e}", input.display()))?;
    let mut data: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("input file is not valid JSON: {e}"))?;
    sanitize_embedded_assets(&mut data).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let config = AppConfig::from_env();
    let result = match config.validate() {
        Ok(credentials) => {
            let state = state_from_credentials(credentials, templates);
            server::run_pipeline(&state, &data).await
        }
        Err(e) => PipelineResult::failed(&e),
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    if result.success {
        Ok(())
    } else {
        anyhow::bail!("{}", result.message)
    }
}
