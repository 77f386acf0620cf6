use url::Url;

use crate::error::{BridgeError, Result};

/// Connection settings for the CircleCI API, scoped to one project.
#[derive(Debug, Clone)]
pub struct CircleCiConfig {
    /// API base URL with trailing slashes stripped
    pub base_url: String,

    /// API key, sent as the basic-auth username with an empty password
    pub api_key: String,

    /// Project slug, e.g. 'gh/org/repo'
    pub project_slug: String,
}

impl CircleCiConfig {
    pub fn new(base_url: String, api_key: String, project_slug: String) -> Result<Self> {
        Url::parse(&base_url)
            .map_err(|e| BridgeError::Config(format!("Invalid CircleCI base URL: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            project_slug,
        })
    }
}

/// Settings for the GitHub API client plus the trigger context of the
/// current action run.
///
/// The ref and event name originate from the action environment
/// (`GITHUB_REF`, `GITHUB_EVENT_NAME`) but are passed in explicitly so the
/// client never reads process state.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base URL with trailing slashes stripped
    pub base_url: String,

    /// Personal access token, sent as a bearer token
    pub token: String,

    /// Repository owner/organization
    pub org: String,

    /// Repository name
    pub repo: String,

    /// Git ref the run was triggered for, e.g. 'refs/pull/17/merge'
    pub github_ref: String,

    /// Action event name, e.g. 'pull_request' or 'push'
    pub event_name: String,
}

impl GitHubConfig {
    pub fn new(
        base_url: String,
        token: String,
        org: String,
        repo: String,
        github_ref: String,
        event_name: String,
    ) -> Result<Self> {
        Url::parse(&base_url)
            .map_err(|e| BridgeError::Config(format!("Invalid GitHub base URL: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
            org,
            repo,
            github_ref,
            event_name,
        })
    }
}
