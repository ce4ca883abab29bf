//! Error types for the pure engine.

use thiserror::Error;

/// Errors raised while compiling a validated configuration into matchers.
///
/// All of these are contract violations: the configuration loader is
/// expected to hand this crate a well-shaped configuration, so a failure
/// here fails the run loudly rather than skipping the offending entry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A glob pattern failed to compile.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    Pattern {
        /// The pattern as written in the configuration (negation marker included).
        pattern: String,
        /// The glob engine's reason.
        reason: String,
    },
    /// A composite match entry specified neither `any` nor `all`.
    #[error("match entry must specify at least one of 'any' or 'all'")]
    EmptyEntry,
    /// A snippet's `files` list was empty.
    #[error("snippet 'files' must be a non-empty list")]
    EmptyFileList,
}

/// Errors raised while rendering template text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{{#name}}` section was never closed.
    #[error("unclosed template section '{0}'")]
    UnclosedSection(String),
    /// A `{{/name}}` appeared with no matching open tag.
    #[error("unexpected closing tag '{0}' in template")]
    UnexpectedClose(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_error_display() {
        let err = ConfigError::Pattern {
            pattern: "!a[".to_string(),
            reason: "unclosed character class".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid glob pattern '!a[': unclosed character class"
        );
    }

    #[test]
    fn empty_entry_display() {
        assert_eq!(
            ConfigError::EmptyEntry.to_string(),
            "match entry must specify at least one of 'any' or 'all'"
        );
    }

    #[test]
    fn template_error_display() {
        assert_eq!(
            TemplateError::UnclosedSection("flag".to_string()).to_string(),
            "unclosed template section 'flag'"
        );
        assert_eq!(
            TemplateError::UnexpectedClose("flag".to_string()).to_string(),
            "unexpected closing tag 'flag' in template"
        );
    }
}
