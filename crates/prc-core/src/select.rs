//! Snippet selection: ordered walk of the configuration's snippets.

use tracing::{debug, info};

use crate::config::CommentConfig;

/// Ids of the snippets whose rules match `changed_files`, in configuration
/// declaration order.
///
/// Never reorders and never deduplicates (ids are unique by configuration
/// invariant). Deterministic: the same inputs always yield the same ordered
/// output.
pub fn matching_snippet_ids(changed_files: &[String], config: &CommentConfig) -> Vec<String> {
    let ids: Vec<String> = config
        .snippets
        .iter()
        .filter(|snippet| {
            debug!(id = snippet.id.as_str(), "evaluating snippet rule");
            snippet.rule.matches(changed_files)
        })
        .map(|snippet| snippet.id.clone())
        .collect();

    info!(?ids, "matched snippet ids");
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlobOptions, MatchEntry, Snippet};

    fn snippet(id: &str, patterns: &[&str]) -> Snippet {
        let entries: Vec<MatchEntry> = patterns
            .iter()
            .map(|p| MatchEntry::Literal((*p).to_string()))
            .collect();
        Snippet::new(id, format!("body of {id}"), &entries, &GlobOptions::default()).unwrap()
    }

    fn config(snippets: Vec<Snippet>) -> CommentConfig {
        CommentConfig {
            snippets,
            ..CommentConfig::default()
        }
    }

    fn files(paths: &[&str]) -> Vec<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn selects_matching_snippets_only() {
        let config = config(vec![
            snippet("docs", &["docs/**/*"]),
            snippet("rust", &["**/*.rs"]),
            snippet("ci", &[".github/**/*"]),
        ]);
        let ids = matching_snippet_ids(&files(&["src/lib.rs", "docs/a.md"]), &config);
        assert_eq!(ids, vec!["docs", "rust"]);
    }

    #[test]
    fn preserves_declaration_order_not_input_order() {
        let config = config(vec![
            snippet("s1", &["a/*"]),
            snippet("s2", &["b/*"]),
            snippet("s3", &["c/*"]),
        ]);
        // Input order is reversed relative to declaration; output is not.
        let ids = matching_snippet_ids(&files(&["c/x", "a/y"]), &config);
        assert_eq!(ids, vec!["s1", "s3"]);
    }

    #[test]
    fn no_matches_yields_empty_list() {
        let config = config(vec![snippet("docs", &["docs/**/*"])]);
        assert!(matching_snippet_ids(&files(&["src/main.rs"]), &config).is_empty());
    }

    #[test]
    fn selection_is_idempotent() {
        let config = config(vec![
            snippet("docs", &["docs/**/*"]),
            snippet("rust", &["**/*.rs"]),
        ]);
        let changed = files(&["docs/a.md", "src/lib.rs"]);
        let first = matching_snippet_ids(&changed, &config);
        let second = matching_snippet_ids(&changed, &config);
        assert_eq!(first, second);
        assert_eq!(first, vec!["docs", "rust"]);
    }
}
