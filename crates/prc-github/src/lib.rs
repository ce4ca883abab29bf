//! # prc-github
//!
//! The hosting-platform collaborator: everything the engine needs from
//! GitHub, behind the [`PullRequestHost`] trait.
//!
//! - [`RepoContext`]: explicit repository/revision context threaded into
//!   every call — nothing reads ambient process state
//! - [`PullRequestHost`]: list changed files, fetch file content, list
//!   comments, create/edit/delete a comment
//! - [`GitHubHost`]: the REST v3 implementation (token auth, changed-file
//!   pagination, base64 contents decoding)
//! - [`previous::latest_managed_comment`]: deterministic selection of the
//!   managed comment among marker-bearing candidates

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod previous;
pub mod types;

pub use client::GitHubHost;
pub use errors::{GitHubError, Result};
pub use types::{IssueComment, PullRequestHost, RepoContext};
