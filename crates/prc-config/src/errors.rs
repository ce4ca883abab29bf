//! Configuration validation error types.

use thiserror::Error;

/// Errors raised while parsing or validating the rule configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The document was not valid YAML.
    #[error("failed to parse configuration YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A key held a value of the wrong type.
    #[error("found unexpected value type '{found}' under key '{key}' (should be {expected})")]
    UnexpectedType {
        /// Dotted path of the offending key (e.g. `.comment.snippets.0.id`).
        key: String,
        /// What was found there.
        found: &'static str,
        /// What the key requires.
        expected: &'static str,
    },
    /// `on-update` held an unknown policy name.
    #[error(
        "found unexpected value '{value}' under key '.comment.on-update' \
         (should be one of: {allowed})"
    )]
    InvalidOnUpdate {
        /// The rejected value.
        value: String,
        /// Comma-joined accepted spellings.
        allowed: String,
    },
    /// A snippet id contained characters outside `[A-Za-z0-9_-]`.
    #[error(
        "found invalid snippet id '{0}' (snippet ids must contain only letters, \
         numbers, dashes, and underscores)"
    )]
    InvalidSnippetId(String),
    /// Two snippets shared an id.
    #[error("found duplicate snippet id '{0}'")]
    DuplicateSnippetId(String),
    /// `glob-options` did not deserialize.
    #[error("invalid value under key '.comment.glob-options': {0}")]
    GlobOptions(String),
    /// A match entry or pattern failed rule compilation.
    #[error(transparent)]
    Rule(#[from] prc_core::ConfigError),
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ValidationError>;
