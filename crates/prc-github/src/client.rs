//! GitHub REST v3 client.
//!
//! Implements [`PullRequestHost`] against the endpoints the run needs.
//! The changed-file listing paginates (100 per page, following until a
//! short page); the comment listing is a single page, which covers any
//! realistic pull-request thread. The base URL is injectable for tests.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{GitHubError, Result};
use crate::types::{IssueComment, PullRequestHost, RepoContext};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const FILES_PER_PAGE: usize = 100;

/// REST v3 implementation of [`PullRequestHost`].
#[derive(Debug)]
pub struct GitHubHost {
    http: reqwest::Client,
    base_url: String,
    context: RepoContext,
}

#[derive(Debug, Deserialize)]
struct PullRequestFile {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    encoding: String,
}

impl GitHubHost {
    /// Build a client against the public GitHub API.
    pub fn new(token: &str, context: RepoContext) -> Result<Self> {
        Self::with_base_url(token, context, DEFAULT_BASE_URL)
    }

    /// Build a client against a specific API base URL (GitHub Enterprise,
    /// tests).
    pub fn with_base_url(
        token: &str,
        context: RepoContext,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| GitHubError::Client(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        let _ = headers.insert(AUTHORIZATION, auth);
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        let _ = headers.insert(USER_AGENT, HeaderValue::from_static("pr-commenter"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GitHubError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            context,
        })
    }

    fn repo_path(&self) -> String {
        format!("/repos/{}/{}", self.context.owner, self.context.repo)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self
            .http
            .get(format!("{}{endpoint}", self.base_url))
            .send()
            .await
            .map_err(|e| GitHubError::Request {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        response.json().await.map_err(|e| GitHubError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    /// Send a request and check only the status, discarding the body.
    async fn expect_success(&self, request: reqwest::RequestBuilder, endpoint: &str) -> Result<()> {
        let response = request.send().await.map_err(|e| GitHubError::Request {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PullRequestHost for GitHubHost {
    async fn changed_files(&self, pr: u64) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for page in 1.. {
            let endpoint = format!(
                "{}/pulls/{pr}/files?per_page={FILES_PER_PAGE}&page={page}",
                self.repo_path()
            );
            let batch: Vec<PullRequestFile> = self.get_json(&endpoint).await?;
            let batch_len = batch.len();
            files.extend(batch.into_iter().map(|f| f.filename));
            if batch_len < FILES_PER_PAGE {
                break;
            }
        }
        debug!(pr, count = files.len(), "fetched changed files");
        Ok(files)
    }

    async fn file_content(&self, path: &str) -> Result<String> {
        let endpoint = format!(
            "{}/contents/{path}?ref={}",
            self.repo_path(),
            self.context.sha
        );
        let contents: ContentsResponse = self.get_json(&endpoint).await?;
        if contents.encoding != "base64" {
            return Err(GitHubError::Decode {
                endpoint,
                reason: format!("unsupported content encoding '{}'", contents.encoding),
            });
        }
        // The API wraps base64 payloads in newlines.
        let packed: String = contents.content.split_whitespace().collect();
        let bytes = BASE64.decode(packed).map_err(|e| GitHubError::Decode {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| GitHubError::Decode {
            endpoint,
            reason: e.to_string(),
        })
    }

    async fn comments(&self, pr: u64) -> Result<Vec<IssueComment>> {
        let endpoint = format!("{}/issues/{pr}/comments?per_page=100", self.repo_path());
        self.get_json(&endpoint).await
    }

    async fn create_comment(&self, pr: u64, body: &str) -> Result<()> {
        let endpoint = format!("{}/issues/{pr}/comments", self.repo_path());
        let request = self
            .http
            .post(format!("{}{endpoint}", self.base_url))
            .json(&serde_json::json!({ "body": body }));
        self.expect_success(request, &endpoint).await
    }

    async fn edit_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        let endpoint = format!("{}/issues/comments/{comment_id}", self.repo_path());
        let request = self
            .http
            .patch(format!("{}{endpoint}", self.base_url))
            .json(&serde_json::json!({ "body": body }));
        self.expect_success(request, &endpoint).await
    }

    async fn delete_comment(&self, comment_id: u64) -> Result<()> {
        let endpoint = format!("{}/issues/comments/{comment_id}", self.repo_path());
        let request = self.http.delete(format!("{}{endpoint}", self.base_url));
        self.expect_success(request, &endpoint).await
    }
}
