//! # contract: interfaces for the pipeline's external collaborators
//!
//! This module defines the traits the pipeline orchestrates against: the
//! content formatter (generative model), the source-control host and the
//! deployment host, plus their concrete request/response types.
//!
//! ## Interface & Extensibility
//! - Implement [`ContentFormatter`], [`RepoHost`] or [`DeployHost`] to plug
//!   in a real client (e.g. an HTTP API) or a test double.
//! - All methods are async and return the typed errors from [`crate::error`].
//!
//! ## Mocking & Testing
//! - Each trait is annotated for `mockall`, so consumers can generate
//!   deterministic mocks for unit and integration tests.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::content::PortfolioContent;
use crate::error::{ContentError, DeployHostError, RepoHostError};

/// Reshapes raw user data into schema-shaped portfolio content.
///
/// A single call: input in, structured object or failure out. Implementors
/// own the prompt, the transport and the response parsing.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ContentFormatter: Send + Sync {
    async fn format(&self, raw: &serde_json::Value) -> Result<PortfolioContent, ContentError>;
}

/// Request to create a remote repository.
#[derive(Debug, Clone)]
pub struct NewRepository<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub private: bool,
    /// Ask the host to seed an initial commit so file writes have a branch.
    pub auto_init: bool,
}

/// A published repository: owner, name and browse URL.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteRepository {
    pub owner: String,
    pub name: String,
    pub url: String,
}

/// A single file write against a repository owned by the host's account.
#[derive(Debug, Clone)]
pub struct FileUpsert<'a> {
    pub repo: &'a str,
    pub path: &'a str,
    pub content: &'a str,
    pub message: &'a str,
    /// Current revision token. Required when the file already exists; the
    /// host rejects an update without it.
    pub revision: Option<&'a str>,
}

/// Source-control host operations used by the publisher and the deploy step.
///
/// The implementor is bound to one account: `owner()` names it and all
/// repository arguments are names under that account.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Account that owns repositories created through this host.
    fn owner(&self) -> &str;

    /// Browse URL for a repository under this host's account.
    fn repository_url(&self, repo: &str) -> String;

    async fn create_repository<'a>(&self, req: NewRepository<'a>) -> Result<(), RepoHostError>;

    /// Current revision token for `path`, or `None` if the file does not
    /// exist yet. Any failure other than a missing file is an error.
    async fn file_revision(&self, repo: &str, path: &str)
        -> Result<Option<String>, RepoHostError>;

    async fn upsert_file<'a>(&self, req: FileUpsert<'a>) -> Result<(), RepoHostError>;

    /// Provider-assigned numeric id for an existing repository.
    async fn repository_id(&self, owner: &str, repo: &str) -> Result<u64, RepoHostError>;
}

/// Build/deploy status reported by the deployment host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadyState {
    Initializing,
    Building,
    Ready,
    Error,
    Canceled,
}

impl ReadyState {
    /// Terminal states never transition again; polling must stop on them.
    pub fn is_terminal(self) -> bool {
        matches!(self, ReadyState::Ready | ReadyState::Error | ReadyState::Canceled)
    }
}

/// Request to create a deployment bound to a repository's default branch.
#[derive(Debug, Clone)]
pub struct NewDeployment<'a> {
    pub name: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    /// The source-control provider's numeric id for the repository.
    pub repo_id: u64,
    pub reference: &'a str,
}

/// A freshly created deployment.
#[derive(Debug, Clone)]
pub struct DeploymentRecord {
    pub id: String,
    pub url: String,
    pub state: ReadyState,
}

/// A point-in-time deployment status.
#[derive(Debug, Clone)]
pub struct DeploymentStatus {
    pub url: String,
    pub state: ReadyState,
}

/// Deployment host operations: trigger a build and watch it.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DeployHost: Send + Sync {
    async fn create_deployment<'a>(
        &self,
        req: NewDeployment<'a>,
    ) -> Result<DeploymentRecord, DeployHostError>;

    async fn deployment_status(&self, id: &str) -> Result<DeploymentStatus, DeployHostError>;
}
