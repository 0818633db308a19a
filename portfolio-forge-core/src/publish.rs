//! Repository publishing: create (or reuse) the remote repository, then push
//! every non-empty file from a materialized file set, in file-set order.
//!
//! Publishing is fail-fast: the first fatal host error aborts the run and
//! leaves the repository partially populated; there is no per-file retry and
//! no rollback. A creation conflict is the one non-fatal host error: the run
//! continues against the existing repository, and because every write reads
//! the current revision token first, repeated publishes of the same file set
//! converge to the same remote contents.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::contract::{FileUpsert, NewRepository, RemoteRepository, RepoHost};
use crate::error::{PipelineError, RepoHostError};
use crate::fileset::FileSet;

/// Options for one publish run.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Fixed repository name. `None` derives a unique time-suffixed name.
    pub repo_name: Option<String>,
    pub description: String,
    /// Pause after creation so the host's auto-initialization settles before
    /// the first file write.
    pub settle: Duration,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            repo_name: None,
            description: "Personal Portfolio Website".to_string(),
            settle: Duration::from_secs(2),
        }
    }
}

/// Repository name with a millisecond-timestamp suffix, unique across
/// concurrent and retried runs.
fn unique_repo_name() -> String {
    format!("portfolio-{}", chrono::Utc::now().timestamp_millis())
}

/// Publish `files` into a new (or conflicting existing) repository.
pub async fn publish<H>(
    host: &H,
    files: &FileSet,
    opts: &PublishOptions,
) -> Result<RemoteRepository, PipelineError>
where
    H: RepoHost + ?Sized,
{
    let name = opts.repo_name.clone().unwrap_or_else(unique_repo_name);
    info!(repo = %name, files = files.len(), "Creating portfolio repository");

    let request = NewRepository {
        name: &name,
        description: &opts.description,
        private: false,
        auto_init: true,
    };
    match host.create_repository(request).await {
        Ok(()) => info!(repo = %name, "Repository created"),
        Err(RepoHostError::AlreadyExists) => {
            warn!(repo = %name, "Repository already exists, continuing against it");
        }
        Err(e) => {
            error!(repo = %name, error = %e, "Repository creation failed");
            return Err(PipelineError::RepositoryWrite(format!(
                "failed to create repository {name}: {e}"
            )));
        }
    }

    // The host is eventually consistent right after creation; let the
    // auto-init commit land before the first contents call.
    tokio::time::sleep(opts.settle).await;

    for (path, content) in files.iter() {
        if content.trim().is_empty() {
            info!(path, "Skipping empty file");
            continue;
        }

        let revision = match host.file_revision(&name, path).await {
            Ok(revision) => revision,
            Err(e) => {
                error!(path, error = %e, "Failed to read existing file revision");
                return Err(PipelineError::RepositoryWrite(format!(
                    "failed to read {path}: {e}"
                )));
            }
        };

        let message = format!("Add {path}");
        let upsert = FileUpsert {
            repo: &name,
            path,
            content,
            message: &message,
            revision: revision.as_deref(),
        };
        if let Err(e) = host.upsert_file(upsert).await {
            error!(path, error = %e, "File upsert failed");
            return Err(PipelineError::RepositoryWrite(format!(
                "failed to push {path}: {e}"
            )));
        }
        info!(path, updated = revision.is_some(), "Pushed file");
    }

    let owner = host.owner().to_string();
    let url = host.repository_url(&name);
    info!(url = %url, "All files published");
    Ok(RemoteRepository { owner, name, url })
}
