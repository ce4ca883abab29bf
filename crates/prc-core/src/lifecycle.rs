//! Comment-lifecycle decision.
//!
//! [`decide`] is a pure function of the previous comment's decoded state,
//! the freshly computed snippet-id list, and the update policy. Repeated
//! runs over an unchanged input set decide [`CommentAction::Keep`]
//! (idempotence); runs over a changed input set converge to exactly one
//! managed comment.

use crate::config::OnUpdate;

/// The managed comment's state from a previous run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviousCommentState {
    /// Whether a managed comment exists on the pull request.
    pub exists: bool,
    /// Ids decoded from its metadata marker. `None` when no comment exists
    /// or when the marker could not be read; an unreadable marker always
    /// counts as "changed".
    pub ids: Option<Vec<String>>,
}

impl PreviousCommentState {
    /// No managed comment found.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A managed comment exists with the given decoded ids.
    #[must_use]
    pub fn found(ids: Vec<String>) -> Self {
        Self {
            exists: true,
            ids: Some(ids),
        }
    }
}

/// The single action a run applies to the pull request's managed comment.
///
/// `Recreate` is the only variant pairing a delete with a create; an edit
/// never pairs with a delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentAction {
    /// No change: leave whatever is there alone.
    Keep,
    /// Post a fresh comment (none existed).
    Create,
    /// Edit the existing comment in place.
    Edit,
    /// Delete the existing comment and post a fresh one.
    Recreate,
    /// Delete the existing comment without replacement.
    Delete,
}

impl CommentAction {
    /// Whether this action posts a new comment.
    #[must_use]
    pub fn creates(self) -> bool {
        matches!(self, Self::Create | Self::Recreate)
    }

    /// Whether this action edits the existing comment.
    #[must_use]
    pub fn edits(self) -> bool {
        matches!(self, Self::Edit)
    }

    /// Whether this action deletes the existing comment.
    #[must_use]
    pub fn deletes(self) -> bool {
        matches!(self, Self::Delete | Self::Recreate)
    }
}

/// Decide what to do with the managed comment.
///
/// `changed` is order-sensitive, exact list equality; a previous comment
/// whose marker could not be decoded (`previous.ids == None`) always counts
/// as changed.
#[must_use]
pub fn decide(
    previous: &PreviousCommentState,
    current_ids: &[String],
    on_update: OnUpdate,
) -> CommentAction {
    let has_content = !current_ids.is_empty();

    if !previous.exists {
        return if has_content {
            CommentAction::Create
        } else {
            CommentAction::Keep
        };
    }

    let changed = previous.ids.as_deref() != Some(current_ids);

    match on_update {
        OnUpdate::Nothing => CommentAction::Keep,
        OnUpdate::Recreate => {
            if !has_content {
                CommentAction::Delete
            } else if changed {
                CommentAction::Recreate
            } else {
                CommentAction::Keep
            }
        }
        OnUpdate::Edit => {
            if has_content && changed {
                CommentAction::Edit
            } else {
                CommentAction::Keep
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    // ── No previous comment ─────────────────────────────────────────

    #[test]
    fn no_previous_no_content_keeps() {
        for policy in [OnUpdate::Recreate, OnUpdate::Edit, OnUpdate::Nothing] {
            let action = decide(&PreviousCommentState::none(), &[], policy);
            assert_eq!(action, CommentAction::Keep);
        }
    }

    #[test]
    fn no_previous_with_content_creates() {
        for policy in [OnUpdate::Recreate, OnUpdate::Edit, OnUpdate::Nothing] {
            let action = decide(&PreviousCommentState::none(), &ids(&["a"]), policy);
            assert_eq!(action, CommentAction::Create);
        }
    }

    // ── recreate policy ─────────────────────────────────────────────

    #[test]
    fn recreate_no_content_deletes() {
        let previous = PreviousCommentState::found(ids(&["a"]));
        assert_eq!(
            decide(&previous, &[], OnUpdate::Recreate),
            CommentAction::Delete
        );
    }

    #[test]
    fn recreate_unchanged_keeps() {
        let previous = PreviousCommentState::found(ids(&["a"]));
        assert_eq!(
            decide(&previous, &ids(&["a"]), OnUpdate::Recreate),
            CommentAction::Keep
        );
    }

    #[test]
    fn recreate_changed_recreates() {
        let previous = PreviousCommentState::found(ids(&["a"]));
        let action = decide(&previous, &ids(&["a", "b"]), OnUpdate::Recreate);
        assert_eq!(action, CommentAction::Recreate);
        assert!(action.creates());
        assert!(action.deletes());
        assert!(!action.edits());
    }

    #[test]
    fn recreate_order_change_counts_as_changed() {
        let previous = PreviousCommentState::found(ids(&["a", "b"]));
        assert_eq!(
            decide(&previous, &ids(&["b", "a"]), OnUpdate::Recreate),
            CommentAction::Recreate
        );
    }

    #[test]
    fn recreate_unreadable_marker_counts_as_changed() {
        let previous = PreviousCommentState {
            exists: true,
            ids: None,
        };
        assert_eq!(
            decide(&previous, &ids(&["a"]), OnUpdate::Recreate),
            CommentAction::Recreate
        );
    }

    // ── edit policy ─────────────────────────────────────────────────

    #[test]
    fn edit_no_content_keeps() {
        let previous = PreviousCommentState::found(ids(&["a"]));
        assert_eq!(decide(&previous, &[], OnUpdate::Edit), CommentAction::Keep);
    }

    #[test]
    fn edit_unchanged_keeps() {
        let previous = PreviousCommentState::found(ids(&["a"]));
        assert_eq!(
            decide(&previous, &ids(&["a"]), OnUpdate::Edit),
            CommentAction::Keep
        );
    }

    #[test]
    fn edit_changed_edits_in_place() {
        let previous = PreviousCommentState::found(ids(&["a"]));
        let action = decide(&previous, &ids(&["b"]), OnUpdate::Edit);
        assert_eq!(action, CommentAction::Edit);
        assert!(action.edits());
        assert!(!action.creates());
        assert!(!action.deletes());
    }

    // ── nothing policy ──────────────────────────────────────────────

    #[test]
    fn nothing_never_acts() {
        let previous = PreviousCommentState::found(ids(&["a"]));
        assert_eq!(
            decide(&previous, &[], OnUpdate::Nothing),
            CommentAction::Keep
        );
        assert_eq!(
            decide(&previous, &ids(&["a", "b"]), OnUpdate::Nothing),
            CommentAction::Keep
        );
    }

    // ── Idempotence across repeated runs ────────────────────────────

    #[test]
    fn repeated_runs_over_unchanged_inputs_are_no_ops() {
        let previous = PreviousCommentState::found(ids(&["a", "b"]));
        let current = ids(&["a", "b"]);
        for policy in [OnUpdate::Recreate, OnUpdate::Edit, OnUpdate::Nothing] {
            assert_eq!(decide(&previous, &current, policy), CommentAction::Keep);
        }
    }
}
