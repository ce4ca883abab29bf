//! # prc-config
//!
//! YAML rule-configuration loading and validation.
//!
//! Parses the `comment:` document the action reads from the repository
//! (kebab-case keys: `on-update`, `glob-options`) and validates it into the
//! [`prc_core::CommentConfig`] model with path-qualified errors
//! (`.comment.snippets.0.id`-style), so a broken configuration fails the
//! run with a message pointing at the offending key. Glob patterns compile
//! here too; no pattern error can surface later, during evaluation.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;

pub use errors::{Result, ValidationError};
pub use loader::parse;
