use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A CircleCI pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// Unique identifier for the pipeline
    pub id: String,
    /// When the pipeline was created
    pub created_at: DateTime<Utc>,
    /// When the pipeline was last updated
    pub updated_at: DateTime<Utc>,
    /// Sequential pipeline number within the project
    pub number: i64,
    /// Lifecycle state of the pipeline
    pub state: String,
}

/// A named workflow within a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique identifier for the workflow
    pub id: String,
    /// Name of the workflow as defined in the project configuration
    pub name: String,
    /// Current status of the workflow
    pub status: WorkflowStatus,
}

/// Status of a workflow as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Success,
    Canceled,
    Running,
    Failed,
}
