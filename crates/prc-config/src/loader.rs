//! YAML parsing and shape validation.
//!
//! The configuration is assumed hostile until proven well-shaped: every
//! key is checked by hand so the error names the exact dotted path, the
//! way the action's users see their file. Validation order follows the
//! document: `comment`, `header`, `on-update`, `glob-options`, `footer`,
//! `snippets` (per-snippet `id`, `body`, `files`), then id uniqueness.

use serde_yaml::Value;
use tracing::debug;

use prc_core::{CommentConfig, GlobOptions, MatchEntry, OnUpdate, Snippet};

use crate::errors::{Result, ValidationError};

/// Parse and validate a YAML configuration document.
pub fn parse(yaml: &str) -> Result<CommentConfig> {
    let doc: Value = serde_yaml::from_str(yaml)?;
    validate(&doc)
}

fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Sequence(_)) => "array",
        Some(Value::Mapping(_)) => "object",
        Some(Value::Tagged(_)) => "tagged value",
    }
}

fn unexpected(key: impl Into<String>, found: Option<&Value>, expected: &'static str) -> ValidationError {
    ValidationError::UnexpectedType {
        key: key.into(),
        found: type_name(found),
        expected,
    }
}

/// Optional string: absent and `null` both mean "not set".
fn optional_string(parent: &Value, key: &str, path: &str) -> Result<Option<String>> {
    match parent.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        other => Err(unexpected(path, other, "a string")),
    }
}

fn validate_on_update(comment: &Value) -> Result<OnUpdate> {
    match comment.get("on-update") {
        None | Some(Value::Null) => Ok(OnUpdate::default()),
        Some(Value::String(s)) => s.parse().map_err(|()| ValidationError::InvalidOnUpdate {
            value: s.clone(),
            allowed: OnUpdate::ALLOWED.join(", "),
        }),
        other => Err(unexpected(".comment.on-update", other, "a string")),
    }
}

fn validate_glob_options(comment: &Value) -> Result<GlobOptions> {
    match comment.get("glob-options") {
        None | Some(Value::Null) => Ok(GlobOptions::default()),
        Some(value @ Value::Mapping(_)) => serde_yaml::from_value(value.clone())
            .map_err(|e| ValidationError::GlobOptions(e.to_string())),
        other => Err(unexpected(".comment.glob-options", other, "an object")),
    }
}

fn valid_snippet_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn pattern_list(value: &Value, path: &str) -> Result<Vec<String>> {
    let Value::Sequence(items) = value else {
        return Err(unexpected(path, Some(value), "a non-empty array of strings"));
    };
    if items.is_empty() {
        return Err(unexpected(path, Some(value), "a non-empty array of strings"));
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(unexpected(format!("{path}.{i}"), Some(other), "a string")),
        })
        .collect()
}

fn validate_match_entry(value: &Value, path: &str) -> Result<MatchEntry> {
    match value {
        Value::String(pattern) => Ok(MatchEntry::Literal(pattern.clone())),
        Value::Mapping(map) => {
            let any = match value.get("any") {
                None | Some(Value::Null) => None,
                Some(v) => Some(pattern_list(v, &format!("{path}.any"))?),
            };
            let all = match value.get("all") {
                None | Some(Value::Null) => None,
                Some(v) => Some(pattern_list(v, &format!("{path}.all"))?),
            };
            if any.is_none() && all.is_none() {
                return Err(unexpected(
                    path,
                    Some(value),
                    "a string or an object with keys 'all' and/or 'any'",
                ));
            }
            // Unknown keys are a typo until proven otherwise.
            for key in map.keys() {
                if !matches!(key, Value::String(k) if k == "any" || k == "all") {
                    return Err(unexpected(
                        path,
                        Some(value),
                        "a string or an object with keys 'all' and/or 'any'",
                    ));
                }
            }
            Ok(MatchEntry::Composite { any, all })
        }
        other => Err(unexpected(
            path,
            Some(other),
            "a string or an object with keys 'all' and/or 'any'",
        )),
    }
}

fn validate_snippet(value: &Value, index: usize, opts: &GlobOptions) -> Result<Snippet> {
    let path = format!(".comment.snippets.{index}");

    let id = match value.get("id") {
        Some(Value::String(s)) => {
            if valid_snippet_id(s) {
                s.clone()
            } else {
                return Err(ValidationError::InvalidSnippetId(s.clone()));
            }
        }
        other => return Err(unexpected(format!("{path}.id"), other, "a string")),
    };

    let body = match value.get("body") {
        Some(Value::String(s)) => s.clone(),
        other => return Err(unexpected(format!("{path}.body"), other, "a string")),
    };

    let files = match value.get("files") {
        Some(Value::Sequence(items)) if !items.is_empty() => items
            .iter()
            .enumerate()
            .map(|(i, item)| validate_match_entry(item, &format!("{path}.files.{i}")))
            .collect::<Result<Vec<_>>>()?,
        other => {
            return Err(unexpected(
                format!("{path}.files"),
                other,
                "a non-empty array",
            ));
        }
    };

    Ok(Snippet::new(id, body, &files, opts)?)
}

/// Validate an already-parsed YAML document.
pub fn validate(doc: &Value) -> Result<CommentConfig> {
    let comment = match doc.get("comment") {
        Some(value @ Value::Mapping(_)) => value,
        other => return Err(unexpected(".comment", other, "an object")),
    };

    let header = optional_string(comment, "header", ".comment.header")?;
    let on_update = validate_on_update(comment)?;
    let glob_options = validate_glob_options(comment)?;
    let footer = optional_string(comment, "footer", ".comment.footer")?;

    let snippets = match comment.get("snippets") {
        Some(Value::Sequence(items)) if !items.is_empty() => items
            .iter()
            .enumerate()
            .map(|(i, item)| validate_snippet(item, i, &glob_options))
            .collect::<Result<Vec<_>>>()?,
        other => {
            return Err(unexpected(
                ".comment.snippets",
                other,
                "a non-empty array",
            ));
        }
    };

    for (i, snippet) in snippets.iter().enumerate() {
        if snippets[..i].iter().any(|other| other.id == snippet.id) {
            return Err(ValidationError::DuplicateSnippetId(snippet.id.clone()));
        }
    }

    debug!(
        snippets = snippets.len(),
        on_update = %on_update,
        "configuration validated"
    );

    Ok(CommentConfig {
        header,
        footer,
        on_update,
        glob_options,
        snippets,
    })
}
