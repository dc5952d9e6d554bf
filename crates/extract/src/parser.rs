use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::ExtractionError;

/// How the candidate `{...}` span is located inside a chatty answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStrategy {
    /// First `{` through the `}` that brings the nesting depth back to zero,
    /// skipping braces inside string literals.
    #[default]
    Balanced,
    /// First `{` through the last `}` in the whole answer.
    Greedy,
}

impl FromStr for SpanStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Self::Balanced),
            "greedy" => Ok(Self::Greedy),
            other => Err(format!("unknown payload strategy '{}'", other)),
        }
    }
}

/// Locate the payload span in `answer`. Returns `None` when there is no `{`
/// followed somewhere by a `}`.
pub fn find_payload_span(answer: &str, strategy: SpanStrategy) -> Option<&str> {
    let start = answer.find('{')?;
    let last = answer.rfind('}').filter(|&end| end > start)?;

    let end = match strategy {
        SpanStrategy::Greedy => last,
        // An unbalanced payload falls back to the greedy span, which then
        // fails to decode.
        SpanStrategy::Balanced => balanced_end(&answer[start..]).map_or(last, |rel| start + rel),
    };

    Some(&answer[start..=end])
}

/// Byte offset of the brace closing the `{` at offset 0, if any.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    // Braces and quotes are ASCII, so byte scanning is safe on UTF-8.
    for (i, b) in text.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Pull the embedded JSON object out of a free-text answer.
pub fn extract_payload(answer: &str, strategy: SpanStrategy) -> Result<Value, ExtractionError> {
    let span = find_payload_span(answer, strategy).ok_or(ExtractionError::NoPayloadFound)?;

    let value: Value = serde_json::from_str(span)
        .map_err(|e| ExtractionError::MalformedPayload(e.to_string()))?;

    if !value.is_object() {
        return Err(ExtractionError::MalformedPayload(
            "payload is not a JSON object".to_string(),
        ));
    }

    tracing::debug!(span_len = span.len(), ?strategy, "decoded payload");
    Ok(value)
}
