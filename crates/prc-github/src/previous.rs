//! Selection of the managed comment among prior candidates.

use prc_core::metadata;
use tracing::info;

use crate::types::IssueComment;

/// The managed comment and its decoded snippet ids.
#[derive(Clone, Debug)]
pub struct ManagedComment<'a> {
    /// The comment carrying the authoritative marker.
    pub comment: &'a IssueComment,
    /// Ids decoded from that marker (possibly empty).
    pub ids: Vec<String>,
}

/// Pick the single authoritative previous comment.
///
/// Among bot comments carrying a valid metadata marker, the most recently
/// created one wins; ties (same timestamp) break by comment id, which is
/// monotonic. Stray older markers are ignored — deleting or editing them is
/// out of scope. An explicit fold keeps the reduction independent of the
/// API's array ordering.
pub fn latest_managed_comment(comments: &[IssueComment]) -> Option<ManagedComment<'_>> {
    let managed = comments
        .iter()
        .filter(|c| c.is_bot())
        .filter_map(|c| {
            metadata::decode(&c.body).map(|ids| ManagedComment { comment: c, ids })
        })
        .fold(None::<ManagedComment<'_>>, |best, candidate| match best {
            None => Some(candidate),
            Some(best) => {
                let newer = (candidate.comment.created_at, candidate.comment.id)
                    > (best.comment.created_at, best.comment.id);
                Some(if newer { candidate } else { best })
            }
        });

    if let Some(ref m) = managed {
        info!(
            comment_id = m.comment.id,
            ids = ?m.ids,
            "found previous managed comment"
        );
    }
    managed
}
