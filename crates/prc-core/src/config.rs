//! Validated comment-configuration model.
//!
//! These types are produced once per run by the configuration loader
//! (`prc-config`) and are read-only afterwards. Globs are compiled here,
//! at construction time, so every configuration error surfaces at load
//! and evaluation never re-inspects pattern strings.

use std::str::FromStr;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::rules::SnippetRule;

/// How the previous managed comment is handled when the snippet set changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnUpdate {
    /// Delete the previous comment and post a fresh one.
    #[default]
    Recreate,
    /// Edit the previous comment in place.
    Edit,
    /// Leave the previous comment untouched.
    Nothing,
}

impl OnUpdate {
    /// The accepted configuration spellings, in documentation order.
    pub const ALLOWED: &'static [&'static str] = &["recreate", "edit", "nothing"];
}

impl FromStr for OnUpdate {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recreate" => Ok(Self::Recreate),
            "edit" => Ok(Self::Edit),
            "nothing" => Ok(Self::Nothing),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for OnUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recreate => write!(f, "recreate"),
            Self::Edit => write!(f, "edit"),
            Self::Nothing => write!(f, "nothing"),
        }
    }
}

/// Glob-engine tuning flags.
///
/// Supplied uniformly to every pattern compiled within one configuration.
/// The defaults give per-segment `*` semantics: `*` stays within one path
/// segment and `**` crosses segments.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct GlobOptions {
    /// Match case-insensitively.
    pub case_insensitive: bool,
    /// `*` and `?` do not match the path separator `/`.
    pub literal_separator: bool,
    /// `\` escapes the following metacharacter instead of matching literally.
    pub backslash_escape: bool,
}

impl Default for GlobOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            literal_separator: true,
            backslash_escape: true,
        }
    }
}

/// One element of a snippet's `files` list, resolved from the raw
/// string-or-object configuration form exactly once at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchEntry {
    /// A single glob pattern; sugar for `Composite { any: [pattern] }`.
    Literal(String),
    /// A composite rule with explicit quantifiers. At least one of
    /// `any`/`all` must be present, each non-empty.
    Composite {
        /// Existential patterns: some changed file must match every one.
        any: Option<Vec<String>>,
        /// Universal patterns: every changed file must match every one.
        all: Option<Vec<String>>,
    },
}

/// A named, conditionally-included block of comment text.
#[derive(Clone, Debug)]
pub struct Snippet {
    /// Unique id within the configuration (letters, digits, `-`, `_`).
    pub id: String,
    /// Markdown body included in the comment when the rule matches.
    pub body: String,
    /// The compiled match rule for this snippet.
    pub rule: SnippetRule,
}

impl Snippet {
    /// Build a snippet, compiling its match entries under `opts`.
    pub fn new(
        id: impl Into<String>,
        body: impl Into<String>,
        files: &[MatchEntry],
        opts: &GlobOptions,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            id: id.into(),
            body: body.into(),
            rule: SnippetRule::compile(files, opts)?,
        })
    }
}

/// A validated comment configuration.
///
/// Snippet order is significant: it is both the rule-evaluation order and
/// the final comment's body ordering.
#[derive(Clone, Debug, Default)]
pub struct CommentConfig {
    /// Optional text above the matched snippet bodies.
    pub header: Option<String>,
    /// Optional text below the matched snippet bodies.
    pub footer: Option<String>,
    /// Update policy for an existing managed comment.
    pub on_update: OnUpdate,
    /// Glob flags the snippets were compiled with.
    pub glob_options: GlobOptions,
    /// The snippets, in declaration order.
    pub snippets: Vec<Snippet>,
}
