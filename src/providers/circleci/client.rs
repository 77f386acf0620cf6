use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

use crate::config::CircleCiConfig;
use crate::error::{BridgeError, Result};
use crate::providers::ensure_success;

use super::types::{Pipeline, Workflow, WorkflowStatus};

/// CircleCI REST client scoped to a single project.
///
/// Holds one HTTP client configured at construction; every request carries
/// the API key as a basic-auth username with an empty password.
pub struct CircleCiClient {
    client: Client,
    config: CircleCiConfig,
}

impl CircleCiClient {
    pub fn new(config: CircleCiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("ci-bridge/0.2")
            .build()
            .map_err(|e| BridgeError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(&self.config.api_key, Some(""))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    fn project_url(&self, path: &str) -> String {
        self.url(&format!("project/{}/{}", self.config.project_slug, path))
    }

    /// Triggers a new pipeline for the given branch and returns its number.
    pub async fn create_pipeline(&self, branch: &str) -> Result<i64> {
        info!("Creating pipeline for branch: {branch}");

        let response = self
            .auth(self.client.post(self.project_url("pipeline")))
            .json(&serde_json::json!({ "branch": branch }))
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let created: CreatePipelineResponse = response.json().await?;
        Ok(created.number)
    }

    /// Fetches the pipelines of a given branch, newest first.
    ///
    /// An empty listing is treated as an error, not an empty success.
    pub async fn branch_pipelines(&self, branch: &str) -> Result<Vec<Pipeline>> {
        debug!("Fetching pipelines for branch: {branch}");

        let response = self
            .auth(self.client.get(self.project_url("pipeline")))
            .query(&[("branch", branch)])
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let result: PipelinesResponse = response.json().await?;
        if result.items.is_empty() {
            return Err(BridgeError::NoPipelines(branch.to_owned()));
        }

        Ok(result.items)
    }

    /// Fetches the workflows of a given pipeline.
    ///
    /// An empty listing is treated as an error, not an empty success.
    pub async fn pipeline_workflows(&self, pipeline_id: &str) -> Result<Vec<Workflow>> {
        debug!("Fetching workflows for pipeline: {pipeline_id}");

        let response = self
            .auth(self.client.get(self.url(&format!("pipeline/{pipeline_id}/workflow"))))
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let result: WorkflowsResponse = response.json().await?;
        if result.items.is_empty() {
            return Err(BridgeError::NoWorkflows(pipeline_id.to_owned()));
        }

        Ok(result.items)
    }

    /// Cancels a workflow.
    ///
    /// The provider's response is surfaced as-is; cancelling a workflow that
    /// already finished is not checked for locally.
    pub async fn cancel_workflow(&self, workflow_id: &str) -> Result<()> {
        info!("Cancelling workflow: {workflow_id}");

        let response = self
            .auth(self.client.post(self.url(&format!("workflow/{workflow_id}/cancel"))))
            .send()
            .await?;
        ensure_success(response).await?;

        Ok(())
    }

    /// Cancels every running workflow named `workflow_name` in the latest
    /// pipeline of `branch`, returning the number of cancels issued.
    ///
    /// The first item of the pipeline listing is taken as the latest; the
    /// API returns pipelines newest-first and that ordering is relied on
    /// here rather than re-derived. A cancel failure partway through aborts
    /// the whole operation and discards the count; workflows already
    /// cancelled stay cancelled.
    pub async fn cancel_last_pipeline_workflows(
        &self,
        branch: &str,
        workflow_name: &str,
    ) -> Result<usize> {
        let pipelines = self.branch_pipelines(branch).await?;
        let latest = &pipelines[0];

        let workflows = self.pipeline_workflows(&latest.id).await?;

        let mut cancelled = 0;
        for workflow in &workflows {
            if workflow.name == workflow_name && workflow.status == WorkflowStatus::Running {
                self.cancel_workflow(&workflow.id).await?;
                cancelled += 1;
            }
        }

        info!("Cancelled {cancelled} workflow(s) named '{workflow_name}' on branch: {branch}");
        Ok(cancelled)
    }
}

/// Response from the pipeline creation endpoint.
#[derive(Deserialize)]
struct CreatePipelineResponse {
    number: i64,
}

/// Response from the pipeline listing endpoint.
#[derive(Deserialize)]
struct PipelinesResponse {
    items: Vec<Pipeline>,
}

/// Response from the workflow listing endpoint.
#[derive(Deserialize)]
struct WorkflowsResponse {
    items: Vec<Workflow>,
}
