#![doc = "Vercel integration: implements the deployment-host contract against the Vercel v13 API."]
//
//! # Vercel Client
//!
//! Implements [`DeployHost`]: deployment creation bound to a GitHub
//! repository's default branch with fixed Next.js build settings, and status
//! fetches by deployment id for the polling loop.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use portfolio_forge_core::contract::{
    DeployHost, DeploymentRecord, DeploymentStatus, NewDeployment, ReadyState,
};
use portfolio_forge_core::error::DeployHostError;

use crate::config::VercelConfig;

const API_BASE: &str = "https://api.vercel.com";

/// Build configuration every portfolio deployment uses.
const FRAMEWORK: &str = "nextjs";
const BUILD_COMMAND: &str = "npm run build";
const OUTPUT_DIRECTORY: &str = ".next";
const INSTALL_COMMAND: &str = "npm install";

pub struct VercelClient {
    http: Client,
    token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GitSource<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    repo: String,
    r#ref: &'a str,
    repo_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectSettings<'a> {
    framework: &'a str,
    build_command: &'a str,
    output_directory: &'a str,
    install_command: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDeploymentBody<'a> {
    name: &'a str,
    git_source: GitSource<'a>,
    project_settings: ProjectSettings<'a>,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentResponse {
    id: String,
    url: String,
    ready_state: ReadyState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    url: String,
    ready_state: ReadyState,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn transport(e: reqwest::Error) -> DeployHostError {
    DeployHostError::Transport(e.to_string())
}

impl VercelClient {
    pub fn new(config: &VercelConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent("portfolio-forge")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            token: config.token.clone(),
        }
    }

    /// Pull the host's error message out of a failed response, falling back
    /// to the raw body.
    async fn api_error(response: reqwest::Response) -> DeployHostError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.error)
            .map(|detail| detail.message)
            .unwrap_or(body);
        DeployHostError::Api(format!("{status}: {message}"))
    }
}

#[async_trait]
impl DeployHost for VercelClient {
    async fn create_deployment<'a>(
        &self,
        req: NewDeployment<'a>,
    ) -> Result<DeploymentRecord, DeployHostError> {
        tracing::info!(
            repo = req.repo,
            repo_id = req.repo_id,
            "Creating deployment"
        );
        let body = CreateDeploymentBody {
            name: req.name,
            git_source: GitSource {
                kind: "github",
                repo: format!("{}/{}", req.owner, req.repo),
                r#ref: req.reference,
                repo_id: req.repo_id.to_string(),
            },
            project_settings: ProjectSettings {
                framework: FRAMEWORK,
                build_command: BUILD_COMMAND,
                output_directory: OUTPUT_DIRECTORY,
                install_command: INSTALL_COMMAND,
            },
            target: "production",
        };

        let response = self
            .http
            .post(format!("{API_BASE}/v13/deployments"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let deployment: DeploymentResponse = response.json().await.map_err(transport)?;
        tracing::info!(
            deployment_id = %deployment.id,
            state = ?deployment.ready_state,
            "Deployment created"
        );
        Ok(DeploymentRecord {
            id: deployment.id,
            url: deployment.url,
            state: deployment.ready_state,
        })
    }

    async fn deployment_status(&self, id: &str) -> Result<DeploymentStatus, DeployHostError> {
        let response = self
            .http
            .get(format!("{API_BASE}/v13/deployments/{id}"))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let status: StatusResponse = response.json().await.map_err(transport)?;
        Ok(DeploymentStatus {
            url: status.url,
            state: status.ready_state,
        })
    }
}
