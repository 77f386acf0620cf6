use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::config::GitHubConfig;
use crate::error::{BridgeError, Result};
use crate::providers::ensure_success;

use super::types::{PullRequest, TriggerEvent};

/// GitHub API client scoped to one repository and one action run.
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("ci-bridge/0.2"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.token))
                .map_err(|e| BridgeError::Config(format!("Invalid GitHub token: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BridgeError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.config.base_url, self.config.org, self.config.repo, path
        )
    }

    /// Gets the pull request(s) associated with the current action run.
    ///
    /// For a pull-request trigger the PR number is parsed out of the ref and
    /// fetched directly; for a push trigger the open PRs whose head matches
    /// the pushed ref are listed, which may legitimately be none.
    pub async fn current_pull_requests(&self) -> Result<Vec<PullRequest>> {
        match self.config.event_name.parse::<TriggerEvent>()? {
            TriggerEvent::PullRequest => {
                let number = parse_pull_request_ref(&self.config.github_ref)?;
                info!("Fetching pull request #{number}");
                let pull_request = self.pull_request(number).await?;
                Ok(vec![pull_request])
            }
            TriggerEvent::Push => {
                let head = format!("{}: {}", self.config.repo, self.config.github_ref);
                info!("Listing pull requests with head: {head}");
                self.pull_requests_by_head(&head).await
            }
        }
    }

    /// Fetches a single pull request by number.
    pub async fn pull_request(&self, number: u64) -> Result<PullRequest> {
        debug!("GET pull request {number}");

        let response = self
            .client
            .get(self.repo_url(&format!("pulls/{number}")))
            .send()
            .await?;
        let response = ensure_success(response).await?;

        Ok(response.json().await?)
    }

    /// Lists pull requests whose head matches the given filter.
    pub async fn pull_requests_by_head(&self, head: &str) -> Result<Vec<PullRequest>> {
        debug!("Listing pull requests for head: {head}");

        let response = self
            .client
            .get(self.repo_url("pulls"))
            .query(&[("head", head)])
            .send()
            .await?;
        let response = ensure_success(response).await?;

        Ok(response.json().await?)
    }
}

/// Extracts the pull-request number from a `refs/pull/<number>/...` ref.
pub(super) fn parse_pull_request_ref(github_ref: &str) -> Result<u64> {
    let segments: Vec<&str> = github_ref.split('/').collect();
    if segments.len() < 3 {
        return Err(BridgeError::InvalidPullRequestRef(github_ref.to_owned()));
    }

    segments[2]
        .parse()
        .map_err(|_| BridgeError::InvalidPullRequestRef(github_ref.to_owned()))
}
