use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::info;

use crate::config::{CircleCiConfig, GitHubConfig};
use crate::providers::circleci::CircleCiClient;
use crate::providers::github::GitHubClient;

#[derive(Parser)]
#[command(name = "ci-bridge")]
#[command(author, version, about = "CI action glue for CircleCI and GitHub", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger a new CircleCI pipeline for a branch
    Trigger {
        #[command(flatten)]
        circleci: CircleCiArgs,

        #[arg(short, long)]
        branch: String,
    },

    /// Cancel running workflows of the latest pipeline for a branch
    Cancel {
        #[command(flatten)]
        circleci: CircleCiArgs,

        #[arg(short, long)]
        branch: String,

        /// Name of the workflow to cancel
        #[arg(short, long)]
        workflow: String,
    },

    /// Resolve the pull request(s) associated with the current run
    PullRequests {
        #[command(flatten)]
        github: GitHubArgs,
    },
}

#[derive(Args)]
struct CircleCiArgs {
    #[arg(long, env = "CIRCLECI_TOKEN", hide_env_values = true)]
    token: String,

    #[arg(long, env = "CIRCLECI_BASE_URL", default_value = "https://circleci.com/api/v2")]
    url: String,

    /// Project slug, e.g. 'gh/org/repo'
    #[arg(short = 'P', long, env = "CIRCLECI_PROJECT_SLUG")]
    project: String,
}

impl CircleCiArgs {
    fn to_config(&self) -> Result<CircleCiConfig> {
        Ok(CircleCiConfig::new(
            self.url.clone(),
            self.token.clone(),
            self.project.clone(),
        )?)
    }
}

#[derive(Args)]
struct GitHubArgs {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    url: String,

    #[arg(long, env = "GITHUB_ORG")]
    org: String,

    #[arg(long, env = "GITHUB_REPO")]
    repo: String,

    /// Git ref the run was triggered for
    #[arg(long = "ref", env = "GITHUB_REF")]
    github_ref: String,

    /// Action event name ('pull_request' or 'push')
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event: String,
}

impl GitHubArgs {
    fn to_config(&self) -> Result<GitHubConfig> {
        Ok(GitHubConfig::new(
            self.url.clone(),
            self.token.clone(),
            self.org.clone(),
            self.repo.clone(),
            self.github_ref.clone(),
            self.event.clone(),
        )?)
    }
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Trigger { circleci, branch } => {
                let client = CircleCiClient::new(circleci.to_config()?)?;
                let number = client.create_pipeline(branch).await?;
                info!("Started pipeline #{number} for branch: {branch}");
                println!("{number}");
            }
            Commands::Cancel {
                circleci,
                branch,
                workflow,
            } => {
                let client = CircleCiClient::new(circleci.to_config()?)?;
                let cancelled = client.cancel_last_pipeline_workflows(branch, workflow).await?;
                println!("{cancelled}");
            }
            Commands::PullRequests { github } => {
                let client = GitHubClient::new(github.to_config()?)?;
                let pull_requests = client.current_pull_requests().await?;

                let json = if self.pretty {
                    serde_json::to_string_pretty(&pull_requests)?
                } else {
                    serde_json::to_string(&pull_requests)?
                };
                println!("{json}");
            }
        }

        Ok(())
    }
}
