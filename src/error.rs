use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No pipelines found for branch '{0}'")]
    NoPipelines(String),

    #[error("Pipeline '{0}' has no workflows")]
    NoWorkflows(String),

    #[error("Failed to parse pull-request number from ref '{0}'")]
    InvalidPullRequestRef(String),

    #[error("Unsupported action event type: {0}")]
    UnsupportedEvent(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
