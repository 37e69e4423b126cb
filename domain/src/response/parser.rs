//! Tolerant JSON extraction and repair for free-form model output.
//!
//! Generation backends are instructed to return bare JSON, but in
//! practice responses arrive wrapped in markdown fences, prefixed with
//! prose, or carrying trailing commas and raw newlines. This module is
//! the single place that absorbs that mess; everything downstream
//! operates on fully-typed, defaulted structures.
//!
//! Pipeline:
//! 1. strip a fenced code block wrapper if present
//! 2. otherwise slice from the first `{`/`[` to the last `}`/`]`
//! 3. strict parse
//! 4. on failure, repair (collapse raw newlines, strip trailing commas)
//!    and retry
//! 5. still unparseable → [`ParseError::Malformed`], a terminal error
//!    for the turn

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised when model output cannot be coerced into shape
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("The response from {context} contained no JSON object or array")]
    NoJsonPayload { context: String },

    #[error("The response from {context} was not valid JSON: {reason}")]
    Malformed { context: String, reason: String },
}

/// Parse model output into `T`, tolerating common formatting damage.
///
/// `context` names the agent or call site for error reporting; it never
/// influences parsing.
pub fn parse_json<T: DeserializeOwned>(raw: &str, context: &str) -> Result<T, ParseError> {
    let candidate = match extract_fenced_block(raw) {
        Some(inner) => inner.to_string(),
        None => extract_bracket_slice(raw)
            .ok_or_else(|| ParseError::NoJsonPayload {
                context: context.to_string(),
            })?
            .to_string(),
    };

    match serde_json::from_str::<T>(&candidate) {
        Ok(value) => Ok(value),
        Err(first_error) => {
            let repaired = strip_trailing_commas(&collapse_newlines(&candidate));
            serde_json::from_str::<T>(&repaired).map_err(|_| ParseError::Malformed {
                context: context.to_string(),
                reason: first_error.to_string(),
            })
        }
    }
}

/// Extract the body of the first fenced code block, if any.
///
/// Accepts ```json and bare ``` fences.
fn extract_fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip an optional language tag up to the first newline
    let body_start = after_fence.find('\n')?;
    let body = &after_fence[body_start + 1..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Slice from the first opening bracket to the last closing bracket.
fn extract_bracket_slice(text: &str) -> Option<&str> {
    let first_brace = text.find('{');
    let first_bracket = text.find('[');
    let start = match (first_brace, first_bracket) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };

    let last_brace = text.rfind('}');
    let last_bracket = text.rfind(']');
    let end = last_brace.max(last_bracket)?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Replace raw newlines with spaces.
///
/// Models occasionally emit literal line breaks inside string values,
/// which strict JSON rejects. String content that legitimately needs a
/// newline arrives as the escaped `\n` sequence and is untouched.
fn collapse_newlines(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

/// Remove commas that directly precede a closing bracket or brace.
///
/// String-aware: commas inside string literals are preserved.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '}' | ']' => {
                // Drop a dangling comma (and the whitespace after it)
                while matches!(out.chars().last(), Some(last) if last.is_whitespace()) {
                    out.pop();
                }
                if out.ends_with(',') {
                    out.pop();
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}
