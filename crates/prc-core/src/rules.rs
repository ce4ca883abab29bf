//! Path matching and rule evaluation.
//!
//! A snippet's `files` list compiles once, at configuration load, into
//! [`SnippetRule`] → [`CompiledEntry`] → [`CompiledPattern`]. Evaluation
//! afterwards is quantifier logic over pre-built matchers; pattern strings
//! are never re-inspected.
//!
//! Quantifier semantics per entry:
//!
//! - `all` (universal): every changed file matches every `all` pattern.
//!   An empty changed-file set satisfies `all` vacuously.
//! - `any` (existential): at least one changed file matches every `any`
//!   pattern. An empty changed-file set never satisfies `any`.
//! - Both present: logical AND of the two conditions.
//!
//! A snippet matches if any of its entries matches (OR, short-circuiting).

use globset::{GlobBuilder, GlobMatcher};
use tracing::trace;

use crate::config::{GlobOptions, MatchEntry};
use crate::errors::ConfigError;

/// One glob pattern compiled under a configuration's [`GlobOptions`].
///
/// A leading `!` in the source marks the pattern as negated: for that
/// pattern alone, the match result is the logical negation of the literal
/// glob evaluation.
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    source: String,
    negated: bool,
    glob: GlobMatcher,
}

impl CompiledPattern {
    /// Compile `pattern`, honoring a leading negation marker.
    pub fn compile(pattern: &str, opts: &GlobOptions) -> Result<Self, ConfigError> {
        let (negated, literal) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let glob = GlobBuilder::new(literal)
            .case_insensitive(opts.case_insensitive)
            .literal_separator(opts.literal_separator)
            .backslash_escape(opts.backslash_escape)
            .build()
            .map_err(|e| ConfigError::Pattern {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?
            .compile_matcher();
        Ok(Self {
            source: pattern.to_string(),
            negated,
            glob,
        })
    }

    /// Evaluate against one repository-relative path.
    pub fn matches(&self, path: &str) -> bool {
        self.glob.is_match(path) != self.negated
    }

    /// The pattern as written in the configuration, negation marker included.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Whether `path` matches every pattern in `patterns`.
fn matches_every(path: &str, patterns: &[CompiledPattern]) -> bool {
    patterns.iter().all(|p| {
        let hit = p.matches(path);
        if !hit {
            trace!(pattern = p.source(), path, "pattern did not match");
        }
        hit
    })
}

/// One match entry with its quantifier lists resolved and compiled.
///
/// `Literal` entries normalize to `any = [pattern]` here, so evaluation has
/// a single shape regardless of how the entry was spelled.
#[derive(Clone, Debug)]
pub struct CompiledEntry {
    any: Vec<CompiledPattern>,
    all: Vec<CompiledPattern>,
}

impl CompiledEntry {
    /// Compile a single match entry under `opts`.
    ///
    /// A composite entry with neither quantifier is a contract violation
    /// and is rejected rather than skipped.
    pub fn compile(entry: &MatchEntry, opts: &GlobOptions) -> Result<Self, ConfigError> {
        let (any, all) = match entry {
            MatchEntry::Literal(pattern) => (Some(std::slice::from_ref(pattern)), None),
            MatchEntry::Composite { any, all } => (any.as_deref(), all.as_deref()),
        };
        if any.is_none_or(<[String]>::is_empty) && all.is_none_or(<[String]>::is_empty) {
            return Err(ConfigError::EmptyEntry);
        }
        let compile_list = |patterns: Option<&[String]>| {
            patterns
                .unwrap_or_default()
                .iter()
                .map(|p| CompiledPattern::compile(p, opts))
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            any: compile_list(any)?,
            all: compile_list(all)?,
        })
    }

    /// Evaluate this entry against the full changed-file set.
    pub fn matches(&self, changed_files: &[String]) -> bool {
        if !self.all.is_empty() && !self.all_satisfied(changed_files) {
            return false;
        }
        if !self.any.is_empty() && !self.any_satisfied(changed_files) {
            return false;
        }
        true
    }

    fn all_satisfied(&self, changed_files: &[String]) -> bool {
        changed_files.iter().all(|f| matches_every(f, &self.all))
    }

    fn any_satisfied(&self, changed_files: &[String]) -> bool {
        changed_files.iter().any(|f| matches_every(f, &self.any))
    }
}

/// A snippet's full compiled rule: OR over its compiled entries.
#[derive(Clone, Debug)]
pub struct SnippetRule {
    entries: Vec<CompiledEntry>,
}

impl SnippetRule {
    /// Compile a non-empty list of match entries under `opts`.
    pub fn compile(entries: &[MatchEntry], opts: &GlobOptions) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyFileList);
        }
        Ok(Self {
            entries: entries
                .iter()
                .map(|e| CompiledEntry::compile(e, opts))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    /// Whether any entry matches the changed-file set.
    pub fn matches(&self, changed_files: &[String]) -> bool {
        self.entries.iter().any(|e| e.matches(changed_files))
    }
}
