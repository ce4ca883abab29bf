//! GitHub collaborator error types.

use thiserror::Error;

/// Errors raised while talking to the GitHub REST API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The request never completed (connection, TLS, timeout).
    #[error("request to {endpoint} failed: {source}")]
    Request {
        /// Endpoint path the request targeted.
        endpoint: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint path the request targeted.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response from {endpoint}: {reason}")]
    Decode {
        /// Endpoint path the request targeted.
        endpoint: String,
        /// What went wrong.
        reason: String,
    },
    /// `GITHUB_REPOSITORY`-style context was malformed.
    #[error("invalid repository '{0}' (expected 'owner/repo')")]
    InvalidRepository(String),
    /// The HTTP client could not be constructed (bad token bytes, TLS setup).
    #[error("failed to construct HTTP client: {0}")]
    Client(String),
}

/// Result type for GitHub operations.
pub type Result<T> = std::result::Result<T, GitHubError>;
