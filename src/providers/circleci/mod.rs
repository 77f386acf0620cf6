mod client;
mod types;

#[cfg(test)]
mod tests;

pub use client::CircleCiClient;
pub use types::{Pipeline, Workflow, WorkflowStatus};
