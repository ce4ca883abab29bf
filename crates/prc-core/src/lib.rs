//! # prc-core
//!
//! Pure rule-matching and comment-lifecycle engine for `pr-commenter`.
//!
//! Everything in this crate is a synchronous, side-effect-free computation
//! over immutable inputs:
//!
//! - **Config model**: [`CommentConfig`], [`Snippet`], [`MatchEntry`] with
//!   compile-once glob resolution ([`rules`])
//! - **Selection**: ordered snippet-id selection over the changed-file set
//!   ([`select`])
//! - **Metadata codec**: the hidden marker that round-trips the posted
//!   snippet-id list ([`metadata`])
//! - **Lifecycle**: the create/edit/delete decision ([`lifecycle`])
//! - **Assembly**: final comment text with template substitution ([`body`],
//!   [`template`])
//!
//! Fetching changed files, loading the YAML configuration, and talking to
//! the hosting platform live in the sibling crates; this one never does I/O.

#![deny(unsafe_code)]

pub mod body;
pub mod config;
pub mod errors;
pub mod lifecycle;
pub mod metadata;
pub mod rules;
pub mod select;
pub mod template;

pub use config::{CommentConfig, GlobOptions, MatchEntry, OnUpdate, Snippet};
pub use errors::{ConfigError, TemplateError};
pub use lifecycle::{CommentAction, PreviousCommentState, decide};
