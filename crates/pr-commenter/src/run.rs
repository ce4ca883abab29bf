//! The run loop: fetch → select → decide → apply.

use anyhow::Context;
use serde_json::Value;
use tracing::info;

use prc_core::{CommentAction, PreviousCommentState, body, decide, select};
use prc_github::previous::latest_managed_comment;
use prc_github::types::PullRequestHost;

/// What a run computed and did, for logging and tests.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// The lifecycle decision.
    pub action: CommentAction,
    /// The snippet ids the changed files matched.
    pub snippet_ids: Vec<String>,
}

/// Execute one full run against `host`.
///
/// Pure computation is separated from I/O: every network call completes
/// before the corresponding decision runs, and the single resulting action
/// is applied at the end (delete before create on the recreate path, the
/// order the previous comment disappears from the thread).
pub async fn run(
    host: &dyn PullRequestHost,
    pr: u64,
    config_path: &str,
    template_vars: &Value,
    dry_run: bool,
) -> anyhow::Result<RunOutcome> {
    let changed_files = host
        .changed_files(pr)
        .await
        .context("failed to list changed files")?;
    let config_text = host
        .file_content(config_path)
        .await
        .with_context(|| format!("failed to fetch configuration '{config_path}'"))?;
    let config = prc_config::parse(&config_text)
        .with_context(|| format!("invalid configuration '{config_path}'"))?;

    let snippet_ids = select::matching_snippet_ids(&changed_files, &config);

    let comments = host.comments(pr).await.context("failed to list comments")?;
    let managed = latest_managed_comment(&comments);
    let previous = managed.as_ref().map_or_else(PreviousCommentState::none, |m| {
        PreviousCommentState::found(m.ids.clone())
    });

    let action = decide(&previous, &snippet_ids, config.on_update);
    info!(?action, ids = ?snippet_ids, "lifecycle decision");

    if dry_run {
        info!("dry run, not applying");
        return Ok(RunOutcome {
            action,
            snippet_ids,
        });
    }

    match action {
        CommentAction::Keep => {}
        CommentAction::Delete => {
            if let Some(m) = &managed {
                info!(comment_id = m.comment.id, "removing previous comment");
                host.delete_comment(m.comment.id).await?;
            }
        }
        CommentAction::Edit => {
            let text = body::assemble(&snippet_ids, &config, template_vars)?;
            if let Some(m) = &managed {
                info!(comment_id = m.comment.id, "updating previous comment");
                host.edit_comment(m.comment.id, &text).await?;
            }
        }
        CommentAction::Create => {
            let text = body::assemble(&snippet_ids, &config, template_vars)?;
            info!("creating a new comment");
            host.create_comment(pr, &text).await?;
        }
        CommentAction::Recreate => {
            let text = body::assemble(&snippet_ids, &config, template_vars)?;
            if let Some(m) = &managed {
                info!(comment_id = m.comment.id, "removing previous comment");
                host.delete_comment(m.comment.id).await?;
            }
            info!("creating a new comment");
            host.create_comment(pr, &text).await?;
        }
    }

    Ok(RunOutcome {
        action,
        snippet_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use prc_github::types::IssueComment;
    use std::sync::Mutex;

    const CONFIG: &str = "
comment:
  header: Header
  snippets:
    - id: docs
      body: Docs changed.
      files: [\"docs/**/*\"]
    - id: rust
      body: Rust changed.
      files: [\"**/*.rs\"]
";

    const CONFIG_EDIT: &str = "
comment:
  on-update: edit
  snippets:
    - id: docs
      body: Docs changed.
      files: [\"docs/**/*\"]
    - id: rust
      body: Rust changed.
      files: [\"**/*.rs\"]
";

    /// What the stub host saw, in call order.
    #[derive(Debug, PartialEq, Eq)]
    enum Applied {
        Created(String),
        Edited(u64, String),
        Deleted(u64),
    }

    struct StubHost {
        files: Vec<String>,
        config: String,
        comments: Vec<IssueComment>,
        applied: Mutex<Vec<Applied>>,
    }

    impl StubHost {
        fn new(files: &[&str], config: &str, comments: Vec<IssueComment>) -> Self {
            Self {
                files: files.iter().map(ToString::to_string).collect(),
                config: config.to_string(),
                comments,
                applied: Mutex::new(Vec::new()),
            }
        }

        fn applied(&self) -> Vec<Applied> {
            self.applied.lock().unwrap().drain(..).collect()
        }
    }

    #[async_trait]
    impl PullRequestHost for StubHost {
        async fn changed_files(&self, _pr: u64) -> prc_github::Result<Vec<String>> {
            Ok(self.files.clone())
        }

        async fn file_content(&self, _path: &str) -> prc_github::Result<String> {
            Ok(self.config.clone())
        }

        async fn comments(&self, _pr: u64) -> prc_github::Result<Vec<IssueComment>> {
            Ok(self.comments.clone())
        }

        async fn create_comment(&self, _pr: u64, body: &str) -> prc_github::Result<()> {
            self.applied
                .lock()
                .unwrap()
                .push(Applied::Created(body.to_string()));
            Ok(())
        }

        async fn edit_comment(&self, comment_id: u64, body: &str) -> prc_github::Result<()> {
            self.applied
                .lock()
                .unwrap()
                .push(Applied::Edited(comment_id, body.to_string()));
            Ok(())
        }

        async fn delete_comment(&self, comment_id: u64) -> prc_github::Result<()> {
            self.applied.lock().unwrap().push(Applied::Deleted(comment_id));
            Ok(())
        }
    }

    fn bot_comment(id: u64, ids_payload: &str) -> IssueComment {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "body": format!("old body\n\n<!-- pr-commenter-metadata: {ids_payload} -->"),
            "created_at": Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap(),
            "user": {"login": "github-actions[bot]", "type": "Bot"}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn first_run_creates_comment_with_marker() {
        let host = StubHost::new(&["docs/a.md"], CONFIG, Vec::new());
        let outcome = run(&host, 7, "cfg.yml", &serde_json::json!({}), false)
            .await
            .unwrap();

        assert_eq!(outcome.action, CommentAction::Create);
        assert_eq!(outcome.snippet_ids, vec!["docs"]);
        let applied = host.applied();
        assert_eq!(applied.len(), 1);
        let Applied::Created(body) = &applied[0] else {
            panic!("expected a create, got {applied:?}");
        };
        assert!(body.starts_with("Header\n\nDocs changed."));
        assert!(body.ends_with("<!-- pr-commenter-metadata: docs -->"));
    }

    #[tokio::test]
    async fn unchanged_ids_are_a_no_op() {
        let host = StubHost::new(
            &["docs/a.md"],
            CONFIG,
            vec![bot_comment(11, "docs")],
        );
        let outcome = run(&host, 7, "cfg.yml", &serde_json::json!({}), false)
            .await
            .unwrap();

        assert_eq!(outcome.action, CommentAction::Keep);
        assert!(host.applied().is_empty());
    }

    #[tokio::test]
    async fn changed_ids_recreate_delete_then_create() {
        let host = StubHost::new(
            &["docs/a.md", "src/lib.rs"],
            CONFIG,
            vec![bot_comment(11, "docs")],
        );
        let outcome = run(&host, 7, "cfg.yml", &serde_json::json!({}), false)
            .await
            .unwrap();

        assert_eq!(outcome.action, CommentAction::Recreate);
        let applied = host.applied();
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0], Applied::Deleted(11));
        let Applied::Created(body) = &applied[1] else {
            panic!("expected a create after the delete, got {applied:?}");
        };
        assert!(body.contains("<!-- pr-commenter-metadata: docs,rust -->"));
    }

    #[tokio::test]
    async fn edit_policy_edits_in_place() {
        let host = StubHost::new(
            &["src/lib.rs"],
            CONFIG_EDIT,
            vec![bot_comment(11, "docs")],
        );
        let outcome = run(&host, 7, "cfg.yml", &serde_json::json!({}), false)
            .await
            .unwrap();

        assert_eq!(outcome.action, CommentAction::Edit);
        let applied = host.applied();
        assert_eq!(applied.len(), 1);
        let Applied::Edited(id, body) = &applied[0] else {
            panic!("expected an edit, got {applied:?}");
        };
        assert_eq!(*id, 11);
        assert!(body.contains("Rust changed."));
    }

    #[tokio::test]
    async fn empty_current_with_previous_deletes() {
        let host = StubHost::new(
            &["LICENSE"],
            CONFIG,
            vec![bot_comment(11, "docs")],
        );
        let outcome = run(&host, 7, "cfg.yml", &serde_json::json!({}), false)
            .await
            .unwrap();

        assert_eq!(outcome.action, CommentAction::Delete);
        assert_eq!(host.applied(), vec![Applied::Deleted(11)]);
    }

    #[tokio::test]
    async fn empty_current_without_previous_does_nothing() {
        let host = StubHost::new(&["LICENSE"], CONFIG, Vec::new());
        let outcome = run(&host, 7, "cfg.yml", &serde_json::json!({}), false)
            .await
            .unwrap();

        assert_eq!(outcome.action, CommentAction::Keep);
        assert!(host.applied().is_empty());
    }

    #[tokio::test]
    async fn dry_run_decides_but_applies_nothing() {
        let host = StubHost::new(
            &["docs/a.md", "src/lib.rs"],
            CONFIG,
            vec![bot_comment(11, "docs")],
        );
        let outcome = run(&host, 7, "cfg.yml", &serde_json::json!({}), true)
            .await
            .unwrap();

        assert_eq!(outcome.action, CommentAction::Recreate);
        assert!(host.applied().is_empty());
    }

    #[tokio::test]
    async fn template_vars_reach_the_body() {
        let config = "
comment:
  header: PR by {{author}}
  snippets:
    - id: docs
      body: Docs changed.
      files: [\"docs/**/*\"]
";
        let host = StubHost::new(&["docs/a.md"], config, Vec::new());
        let vars = serde_json::json!({"author": "octocat"});
        let _ = run(&host, 7, "cfg.yml", &vars, false).await.unwrap();

        let applied = host.applied();
        let Applied::Created(body) = &applied[0] else {
            panic!("expected a create");
        };
        assert!(body.starts_with("PR by octocat"));
    }

    #[tokio::test]
    async fn invalid_config_fails_the_run() {
        let host = StubHost::new(&["docs/a.md"], "comment: {}", Vec::new());
        let result = run(&host, 7, "cfg.yml", &serde_json::json!({}), false).await;
        assert!(result.is_err());
        assert!(host.applied().is_empty());
    }
}
