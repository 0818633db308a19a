//! Deployment triggering and status polling.
//!
//! The trigger path (repository-id lookup, deployment creation) is fatal on
//! failure; the polling path is not. Once a deployment exists, a status-fetch
//! hiccup or an exhausted poll budget only stops the loop, and the last known
//! state is reported instead of erasing a successful creation.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::contract::{DeployHost, NewDeployment, ReadyState, RepoHost};
use crate::error::PipelineError;

/// Polling options: fixed interval, bounded attempt budget.
#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_polls: 60,
        }
    }
}

/// How the polling loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollOutcome {
    /// The deployment reached READY, ERROR or CANCELED.
    Terminal,
    /// A status fetch failed; the last known state is reported.
    StatusUnavailable,
    /// The poll budget ran out while the build was still in progress.
    BudgetExhausted,
}

/// Final (or last-observed) deployment state for the outward response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummary {
    pub deployment_id: String,
    pub deployment_url: String,
    pub status: ReadyState,
    pub poll_outcome: PollOutcome,
}

/// Split `owner/name` out of a repository browse URL.
fn parse_repo_url(url: &str) -> Option<(String, String)> {
    let rest = url.strip_prefix("https://github.com/")?;
    let mut parts = rest.splitn(2, '/');
    let owner = parts.next()?.to_string();
    let name = parts.next()?.trim_end_matches('/').to_string();
    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some((owner, name))
}

/// Trigger a deployment for a published repository and poll it toward a
/// terminal state.
pub async fn deploy<R, D>(
    repo_host: &R,
    deploy_host: &D,
    repository_url: &str,
    opts: &DeployOptions,
) -> Result<DeploymentSummary, PipelineError>
where
    R: RepoHost + ?Sized,
    D: DeployHost + ?Sized,
{
    let (owner, repo) = parse_repo_url(repository_url).ok_or_else(|| {
        PipelineError::DeploymentTrigger(format!(
            "unrecognized repository URL: {repository_url}"
        ))
    })?;

    let repo_id = repo_host
        .repository_id(&owner, &repo)
        .await
        .map_err(|e| {
            PipelineError::DeploymentTrigger(format!(
                "failed to resolve repository id for {owner}/{repo}: {e}"
            ))
        })?;
    info!(owner = %owner, repo = %repo, repo_id, "Resolved repository id");

    let request = NewDeployment {
        name: &repo,
        owner: &owner,
        repo: &repo,
        repo_id,
        reference: "main",
    };
    let record = deploy_host
        .create_deployment(request)
        .await
        .map_err(|e| PipelineError::DeploymentTrigger(format!("failed to create deployment: {e}")))?;
    info!(deployment_id = %record.id, state = ?record.state, "Deployment created");

    let mut state = record.state;
    let mut url = record.url;
    let mut outcome = PollOutcome::Terminal;
    let mut polls = 0u32;

    while !state.is_terminal() {
        if polls >= opts.max_polls {
            warn!(
                deployment_id = %record.id,
                polls,
                "Poll budget exhausted before a terminal state"
            );
            outcome = PollOutcome::BudgetExhausted;
            break;
        }
        tokio::time::sleep(opts.poll_interval).await;
        polls += 1;

        match deploy_host.deployment_status(&record.id).await {
            Ok(status) => {
                state = status.state;
                url = status.url;
                info!(deployment_id = %record.id, state = ?state, poll = polls, "Deployment status");
            }
            Err(e) => {
                warn!(
                    deployment_id = %record.id,
                    error = %e,
                    "Status fetch failed, reporting last known state"
                );
                outcome = PollOutcome::StatusUnavailable;
                break;
            }
        }
    }

    Ok(DeploymentSummary {
        deployment_id: record.id,
        deployment_url: format!("https://{url}"),
        status: state,
        poll_outcome: outcome,
    })
}
