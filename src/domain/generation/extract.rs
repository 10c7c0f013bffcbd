//! Extracting a JSON object from free-form generated text
//!
//! Generation endpoints wrap their JSON in prose, code fences or whitespace.
//! The extractor returns the first syntactically valid JSON object found in
//! the text; every failure is returned as a value, never a panic.

use serde_json::Value;

use crate::domain::DomainError;

/// Extract the first syntactically valid JSON object from `text`.
pub fn extract_json(text: &str) -> Result<Value, DomainError> {
    for (start, _) in text.char_indices().filter(|(_, c)| *c == '{') {
        let Some(end) = find_balanced_end(text, start) else {
            continue;
        };

        if let Ok(value) = serde_json::from_str::<Value>(&text[start..=end]) {
            if value.is_object() {
                return Ok(value);
            }
        }
    }

    Err(DomainError::parse(
        "no valid JSON object found in generated text",
    ))
}

/// Byte index of the `}` closing the object opened at `start`, respecting
/// string literals and escapes.
fn find_balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
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
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}
