//! Comment-body assembly.

use serde_json::Value;

use crate::config::CommentConfig;
use crate::errors::TemplateError;
use crate::{metadata, template};

/// Assemble the final comment text for `current_ids`.
///
/// Concatenates, blank-line separated and omitting empty or absent pieces:
/// the header, each matched snippet's body in configuration declaration
/// order, the footer, and the encoded metadata marker (always last, never
/// empty). The concatenated text then goes through one template-rendering
/// pass with `template_vars`.
pub fn assemble(
    current_ids: &[String],
    config: &CommentConfig,
    template_vars: &Value,
) -> Result<String, TemplateError> {
    let mut pieces: Vec<&str> = Vec::new();

    if let Some(header) = config.header.as_deref() {
        pieces.push(header);
    }
    for snippet in &config.snippets {
        if current_ids.iter().any(|id| *id == snippet.id) {
            pieces.push(&snippet.body);
        }
    }
    if let Some(footer) = config.footer.as_deref() {
        pieces.push(footer);
    }

    let marker = metadata::encode(current_ids);
    pieces.push(&marker);

    let raw = pieces
        .iter()
        .filter(|piece| !piece.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n");

    template::render(&raw, template_vars)
}
