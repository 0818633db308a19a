#![doc = "GitHub integration: implements the repository-host contract against the GitHub REST API."]
//
//! # GitHub Client
//!
//! Implements [`RepoHost`] for real use against `api.github.com`: repository
//! creation with auto-initialization, per-file revision reads, idempotent
//! create-or-update file writes and repository-id lookup for the deploy step.
//!
//! All transport, serialization and error mapping are encapsulated here; the
//! publisher only sees the trait and its typed errors. A creation HTTP 422 is
//! surfaced as [`RepoHostError::AlreadyExists`] so the caller can continue
//! against an existing repository, and a contents HTTP 404 is a plain
//! `Ok(None)`: a file that does not exist yet is expected, not an error.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use portfolio_forge_core::contract::{FileUpsert, NewRepository, RepoHost};
use portfolio_forge_core::error::RepoHostError;

use crate::config::GithubConfig;

const API_BASE: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github.v3+json";
const API_VERSION: &str = "2022-11-28";

pub struct GithubClient {
    http: Client,
    token: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ContentInfo {
    sha: String,
}

fn transport(e: reqwest::Error) -> RepoHostError {
    RepoHostError::Transport(e.to_string())
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent("portfolio-forge")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            token: config.token.clone(),
            username: config.username.clone(),
        }
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn api_error(response: reqwest::Response) -> RepoHostError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        RepoHostError::Api(format!("{status}: {body}"))
    }
}

#[async_trait]
impl RepoHost for GithubClient {
    fn owner(&self) -> &str {
        &self.username
    }

    fn repository_url(&self, repo: &str) -> String {
        format!("https://github.com/{}/{repo}", self.username)
    }

    async fn create_repository<'a>(&self, req: NewRepository<'a>) -> Result<(), RepoHostError> {
        tracing::info!(repo = req.name, "Creating repository for the authenticated user");
        let response = self
            .request(reqwest::Method::POST, format!("{API_BASE}/user/repos"))
            .json(&json!({
                "name": req.name,
                "private": req.private,
                "auto_init": req.auto_init,
                "description": req.description,
            }))
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(RepoHostError::AlreadyExists);
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }

    async fn file_revision(
        &self,
        repo: &str,
        path: &str,
    ) -> Result<Option<String>, RepoHostError> {
        let url = format!("{API_BASE}/repos/{}/{repo}/contents/{path}", self.username);
        let response = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                // A directory listing comes back as an array and carries no
                // usable revision token.
                let body: serde_json::Value = response.json().await.map_err(transport)?;
                match serde_json::from_value::<ContentInfo>(body) {
                    Ok(info) => Ok(Some(info.sha)),
                    Err(_) => Ok(None),
                }
            }
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn upsert_file<'a>(&self, req: FileUpsert<'a>) -> Result<(), RepoHostError> {
        tracing::info!(
            path = req.path,
            update = req.revision.is_some(),
            "Pushing file contents"
        );
        let mut body = json!({
            "message": req.message,
            "content": STANDARD.encode(req.content),
        });
        if let Some(revision) = req.revision {
            body["sha"] = json!(revision);
        }

        let url = format!(
            "{API_BASE}/repos/{}/{}/contents/{}",
            self.username, req.repo, req.path
        );
        let response = self
            .request(reqwest::Method::PUT, url)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }

    async fn repository_id(&self, owner: &str, repo: &str) -> Result<u64, RepoHostError> {
        let response = self
            .request(reqwest::Method::GET, format!("{API_BASE}/repos/{owner}/{repo}"))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        let info: RepositoryInfo = response.json().await.map_err(transport)?;
        Ok(info.id)
    }
}
