//! Context, wire types, and the host trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::{GitHubError, Result};

/// The repository and revision a run operates on.
///
/// Threaded explicitly into the client at construction — collaborator calls
/// never read ambient process state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoContext {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Commit SHA the configuration is read at.
    pub sha: String,
}

impl RepoContext {
    /// Build a context from a `owner/repo` slug (the `GITHUB_REPOSITORY`
    /// format) and a commit SHA.
    pub fn from_slug(slug: &str, sha: impl Into<String>) -> Result<Self> {
        match slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    sha: sha.into(),
                })
            }
            _ => Err(GitHubError::InvalidRepository(slug.to_string())),
        }
    }
}

/// The author of an issue comment.
#[derive(Clone, Debug, Deserialize)]
pub struct CommentAuthor {
    /// Account login.
    pub login: String,
    /// Account type as reported by the API (`User`, `Bot`, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

/// A pull-request (issue) comment.
#[derive(Clone, Debug, Deserialize)]
pub struct IssueComment {
    /// Comment id, unique per repository.
    pub id: u64,
    /// Full comment body.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Comment author.
    pub user: CommentAuthor,
}

impl IssueComment {
    /// Whether the comment was posted by a bot account.
    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.user.kind == "Bot"
    }
}

/// The operations the engine requires from the hosting platform.
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    /// Repository-relative paths of the files changed in `pr`.
    async fn changed_files(&self, pr: u64) -> Result<Vec<String>>;

    /// Decoded content of the file at `path`, read at the context's SHA.
    async fn file_content(&self, path: &str) -> Result<String>;

    /// All comments on `pr`, oldest first (API order).
    async fn comments(&self, pr: u64) -> Result<Vec<IssueComment>>;

    /// Post a new comment on `pr`.
    async fn create_comment(&self, pr: u64, body: &str) -> Result<()>;

    /// Replace the body of an existing comment.
    async fn edit_comment(&self, comment_id: u64, body: &str) -> Result<()>;

    /// Delete an existing comment.
    async fn delete_comment(&self, comment_id: u64) -> Result<()>;
}
