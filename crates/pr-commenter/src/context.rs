//! Run-input resolution: event payload and template variables.

use std::path::Path;

use anyhow::{Context, bail};
use serde_json::{Map, Value};
use tracing::warn;

/// Extract the pull request number from a GitHub Actions event payload.
///
/// Returns `None` for events that carry no `pull_request` (push, schedule),
/// and for unreadable payloads — the caller treats both as "not a PR run".
pub fn pr_number_from_event(path: &Path) -> Option<u64> {
    let payload = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read event payload");
            return None;
        }
    };
    let event: Value = match serde_json::from_str(&payload) {
        Ok(event) => event,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not parse event payload");
            return None;
        }
    };
    event.get("pull_request")?.get("number")?.as_u64()
}

/// Build the template-variable mapping from repeated `key=value` flags.
///
/// Dots in the key nest: `pr.author=octocat` produces
/// `{"pr": {"author": "octocat"}}`. Later flags overwrite earlier ones.
pub fn template_vars(pairs: &[String]) -> anyhow::Result<Value> {
    let mut vars = Value::Object(Map::new());
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("template variable '{pair}' is not of the form key=value"))?;
        if key.is_empty() {
            bail!("template variable '{pair}' has an empty key");
        }
        insert_dotted(&mut vars, key, Value::String(value.to_string()));
    }
    Ok(vars)
}

fn insert_dotted(vars: &mut Value, key: &str, value: Value) {
    let mut current = vars;
    let mut segments = key.split('.').peekable();
    while let Some(segment) = segments.next() {
        let map = current
            .as_object_mut()
            .expect("insert_dotted walks objects only");
        if segments.peek().is_none() {
            let _ = map.insert(segment.to_string(), value);
            return;
        }
        let entry = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            // A scalar in the middle of a deeper path is replaced.
            *entry = Value::Object(Map::new());
        }
        current = entry;
    }
}
