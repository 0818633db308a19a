//! Pipeline coordination: one inbound request, one run, exactly one result.
//!
//! A run moves strictly forward (content, file set, repository, deployment)
//! and the first fatal failure aborts everything after it. The
//! single-response guarantee is structural: [`Pipeline::run`] returns one
//! owned [`PipelineResult`] and nothing else ever emits an outcome, so no
//! flag or channel can produce a second response. Completed remote side
//! effects are never undone.

use serde::Serialize;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::contract::{ContentFormatter, DeployHost, RepoHost};
use crate::deploy::{deploy, DeployOptions, DeploymentSummary};
use crate::error::PipelineError;
use crate::fileset::FileSet;
use crate::materialize::materialize;
use crate::publish::{publish, PublishOptions};

/// Progress marker for one run, logged at each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStage {
    Started,
    ContentReady,
    Materialized,
    Published,
    DeployTriggered,
    Done,
    Aborted,
}

/// The single outward-facing record of a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vercel_deployment: Option<DeploymentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl PipelineResult {
    pub fn completed(repo_url: String, deployment: DeploymentSummary) -> Self {
        Self {
            success: true,
            message: "Template repository created and deployment initiated".to_string(),
            template_repo_url: Some(repo_url),
            vercel_deployment: Some(deployment),
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(err: &PipelineError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            template_repo_url: None,
            vercel_deployment: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind().to_string()),
        }
    }
}

/// One run's collaborators and options, constructed per request and passed
/// by reference. No global client handles.
pub struct Pipeline<'a, F, R, D>
where
    F: ContentFormatter + ?Sized,
    R: RepoHost + ?Sized,
    D: DeployHost + ?Sized,
{
    pub formatter: &'a F,
    pub repo_host: &'a R,
    pub deploy_host: &'a D,
    pub publish: PublishOptions,
    pub deploy: DeployOptions,
}

impl<'a, F, R, D> Pipeline<'a, F, R, D>
where
    F: ContentFormatter + ?Sized,
    R: RepoHost + ?Sized,
    D: DeployHost + ?Sized,
{
    /// Execute one full run. Always returns exactly one result; fatal errors
    /// are classified and embedded rather than propagated.
    pub async fn run(
        &self,
        raw: &serde_json::Value,
        base: &FileSet,
        variant: &FileSet,
    ) -> PipelineResult {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline_run", %run_id);
        async {
            match self.run_inner(raw, base, variant).await {
                Ok(result) => result,
                Err(e) => {
                    error!(stage = ?RunStage::Aborted, kind = e.kind(), error = %e, "Pipeline run aborted");
                    PipelineResult::failed(&e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run_inner(
        &self,
        raw: &serde_json::Value,
        base: &FileSet,
        variant: &FileSet,
    ) -> Result<PipelineResult, PipelineError> {
        info!(stage = ?RunStage::Started, "Pipeline run started");

        let content = self
            .formatter
            .format(raw)
            .await
            .map_err(|e| PipelineError::ContentFormat(e.to_string()))?;
        info!(stage = ?RunStage::ContentReady, "Structured content ready");

        let files = materialize(base, variant, &content);
        info!(stage = ?RunStage::Materialized, files = files.len(), "Template materialized");

        let repo = publish(self.repo_host, &files, &self.publish).await?;
        info!(stage = ?RunStage::Published, url = %repo.url, "Repository published");

        let deployment = deploy(self.repo_host, self.deploy_host, &repo.url, &self.deploy).await?;
        info!(
            stage = ?RunStage::DeployTriggered,
            deployment_id = %deployment.deployment_id,
            status = ?deployment.status,
            "Deployment triggered"
        );

        let result = PipelineResult::completed(repo.url, deployment);
        info!(stage = ?RunStage::Done, "Pipeline run complete");
        Ok(result)
    }
}
