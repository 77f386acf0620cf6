use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BridgeError;

/// Kind of event that triggered the current action run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The run was triggered directly by a pull request
    PullRequest,
    /// The run was triggered by a push to a branch
    Push,
}

impl FromStr for TriggerEvent {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pull_request" => Ok(Self::PullRequest),
            "push" => Ok(Self::Push),
            other => Err(BridgeError::UnsupportedEvent(other.to_owned())),
        }
    }
}

/// A pull request as returned by the GitHub API.
///
/// Only the number is read locally; every other field the provider sends is
/// carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull-request number within the repository
    pub number: u64,

    /// Remaining provider-owned fields, passed through as-is
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}
