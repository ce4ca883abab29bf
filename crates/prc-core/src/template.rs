//! Brace-style template substitution.
//!
//! A deliberately small renderer over a nested JSON mapping:
//!
//! - `{{path.to.value}}` — interpolate a scalar (string, number, boolean)
//!   looked up by dotted path. Unknown paths render as empty text.
//! - `{{#path}}…{{/path}}` — boolean-gated section: the contents render
//!   iff the resolved value is truthy. Sections nest.
//!
//! Truthiness: `false`, `null`, a missing path, `""`, `0`, and empty
//! arrays/objects are falsy; everything else is truthy.

use serde_json::Value;

use crate::errors::TemplateError;

#[derive(Debug)]
enum Token<'a> {
    Text(&'a str),
    Var(&'a str),
    Open(&'a str),
    Close(&'a str),
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        if start > 0 {
            tokens.push(Token::Text(&rest[..start]));
        }
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            // Unterminated tag: keep the remainder as literal text.
            tokens.push(Token::Text(&rest[start..]));
            return tokens;
        };
        let tag = after[..end].trim();
        let token = if let Some(name) = tag.strip_prefix('#') {
            Token::Open(name.trim())
        } else if let Some(name) = tag.strip_prefix('/') {
            Token::Close(name.trim())
        } else {
            Token::Var(tag)
        };
        tokens.push(token);
        rest = &after[end + 2..];
    }
    if !rest.is_empty() {
        tokens.push(Token::Text(rest));
    }
    tokens
}

/// Look up a dotted path in a nested mapping.
fn lookup<'a>(vars: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(vars, |value, key| value.as_object()?.get(key))
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // Composites and unknowns interpolate as empty text.
        _ => String::new(),
    }
}

/// Render `tokens[pos..]` until the close tag named `stop` (or the end),
/// appending to `out` when `emit` is set. Returns the index just past the
/// consumed tokens.
fn render_slice(
    tokens: &[Token<'_>],
    pos: usize,
    stop: Option<&str>,
    vars: &Value,
    out: &mut String,
    emit: bool,
) -> Result<usize, TemplateError> {
    let mut i = pos;
    while i < tokens.len() {
        match tokens[i] {
            Token::Text(text) => {
                if emit {
                    out.push_str(text);
                }
                i += 1;
            }
            Token::Var(path) => {
                if emit {
                    out.push_str(&scalar_text(lookup(vars, path)));
                }
                i += 1;
            }
            Token::Open(path) => {
                let gate = emit && is_truthy(lookup(vars, path));
                i = render_slice(tokens, i + 1, Some(path), vars, out, gate)?;
            }
            Token::Close(path) => {
                return match stop {
                    Some(open) if open == path => Ok(i + 1),
                    _ => Err(TemplateError::UnexpectedClose(path.to_string())),
                };
            }
        }
    }
    match stop {
        Some(open) => Err(TemplateError::UnclosedSection(open.to_string())),
        None => Ok(i),
    }
}

/// Render `input` against `vars`.
pub fn render(input: &str, vars: &Value) -> Result<String, TemplateError> {
    let tokens = tokenize(input);
    let mut out = String::with_capacity(input.len());
    let _ = render_slice(&tokens, 0, None, vars, &mut out, true)?;
    Ok(out)
}
