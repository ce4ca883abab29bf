//! # pr-commenter
//!
//! Binary entry point: resolves the run context from CLI flags and the
//! GitHub Actions environment, then executes one fetch → select → decide →
//! apply cycle.

#![deny(unsafe_code)]

mod context;
mod run;

use std::path::Path;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prc_github::{GitHubHost, RepoContext};

/// Posts and maintains a snippet-based summary comment on pull requests.
#[derive(Parser, Debug)]
#[command(name = "pr-commenter", about = "Maintains a rule-driven summary comment on pull requests")]
struct Cli {
    /// Repository path of the rule configuration, read at the current SHA.
    #[arg(long, default_value = ".github/pr-commenter.yml")]
    config_file: String,

    /// Pull request number (defaults to the Actions event payload).
    #[arg(long)]
    pr: Option<u64>,

    /// Compute and log the action without applying it.
    #[arg(long)]
    dry_run: bool,

    /// Template variable as key=value; dots in the key nest. Repeatable.
    #[arg(long = "template-var")]
    template_vars: Vec<String>,

    /// GitHub API base URL.
    #[arg(long, default_value = "https://api.github.com")]
    api_url: String,
}

impl Cli {
    /// PR number from the flag, falling back to the event payload.
    fn resolve_pr(&self) -> Option<u64> {
        self.pr.or_else(|| {
            std::env::var("GITHUB_EVENT_PATH")
                .ok()
                .and_then(|p| context::pr_number_from_event(Path::new(&p)))
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();

    let Some(pr) = args.resolve_pr() else {
        // Not a pull-request run (push, schedule, ...): nothing to do.
        info!("could not determine a pull request number, exiting");
        return Ok(());
    };

    let token = std::env::var("GITHUB_TOKEN").context("GITHUB_TOKEN is not set")?;
    let repository =
        std::env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY is not set")?;
    let sha = std::env::var("GITHUB_SHA").context("GITHUB_SHA is not set")?;

    let template_vars = context::template_vars(&args.template_vars)?;
    let repo = RepoContext::from_slug(&repository, sha)?;
    info!(
        repository = repository.as_str(),
        pr,
        config_file = args.config_file.as_str(),
        "starting run"
    );

    let host = GitHubHost::with_base_url(&token, repo, &args.api_url)?;
    let outcome = run::run(&host, pr, &args.config_file, &template_vars, args.dry_run).await?;

    info!(action = ?outcome.action, ids = ?outcome.snippet_ids, "run complete");
    Ok(())
}
