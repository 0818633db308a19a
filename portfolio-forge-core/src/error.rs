use thiserror::Error;

/// Fatal run failures, classified for the single outward error response.
///
/// Non-fatal conditions are deliberately absent: a repository-creation
/// conflict lets the run continue, and a status-fetch failure during
/// deployment polling only stops the polling loop.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Required credentials are missing or incomplete. Never retried.
    #[error("{0}")]
    Configuration(String),

    /// The generative call failed or its output did not fit the schema.
    /// Raised before any remote side effect.
    #[error("content formatting failed: {0}")]
    ContentFormat(String),

    /// A file read or upsert against the repository host failed. Files
    /// already written remain on the remote host.
    #[error("repository write failed: {0}")]
    RepositoryWrite(String),

    /// Repository-id lookup or deployment creation failed. The repository
    /// itself remains published.
    #[error("deployment trigger failed: {0}")]
    DeploymentTrigger(String),
}

impl PipelineError {
    /// Stable classification tag for the outward JSON response.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Configuration(_) => "configuration",
            PipelineError::ContentFormat(_) => "content_format",
            PipelineError::RepositoryWrite(_) => "repository_write",
            PipelineError::DeploymentTrigger(_) => "deployment_trigger",
        }
    }
}

/// Errors from the content-formatting boundary.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The generative call itself failed (transport, auth, provider error).
    #[error("text generation failed: {0}")]
    Generation(String),

    /// The model response parsed, but a required top-level section is absent.
    #[error("structured content is missing the `{0}` section")]
    MissingSection(String),

    /// The extracted block is not a JSON object.
    #[error("structured content must be a JSON object")]
    NotAnObject,

    /// The extracted block is not valid JSON for the schema.
    #[error("structured content does not match the schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Errors from the source-control host boundary.
#[derive(Debug, Error)]
pub enum RepoHostError {
    /// Creation reported the repository name is taken. Callers treat this
    /// as success and continue against the existing repository.
    #[error("repository already exists")]
    AlreadyExists,

    /// The host rejected the request (anything other than a missing file).
    #[error("repository host error: {0}")]
    Api(String),

    /// The request never completed (connection, TLS, timeout).
    #[error("repository host transport error: {0}")]
    Transport(String),
}

/// Errors from the deployment host boundary.
#[derive(Debug, Error)]
pub enum DeployHostError {
    #[error("deployment host error: {0}")]
    Api(String),

    #[error("deployment host transport error: {0}")]
    Transport(String),
}
