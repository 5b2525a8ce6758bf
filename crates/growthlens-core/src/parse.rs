//! JSON extraction from free-form model text.
//!
//! The provider is asked for a single clean JSON object, but LLM replies often
//! wrap it in markdown fences or prose. The extraction lives here, behind one
//! narrow function, so the validator only ever sees parsed JSON.

use serde_json::Value;
use thiserror::Error;

const SNIPPET_LEN: usize = 120;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("provider returned empty text")]
    EmptyText,
    #[error("provider reply did not contain a JSON object: \"{snippet}\"")]
    NoJsonObject { snippet: String },
    #[error("provider reply contained invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// Extract and parse the outermost `{...}` span of a free-form reply.
///
/// Mirrors a greedy first-`{`-to-last-`}` match, which tolerates markdown
/// fences and surrounding prose. A reply with no object at all is usually a
/// conversational answer, so the error carries a snippet of it.
pub fn extract_json_object(text: &str) -> Result<Value, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyText);
    }

    let start = trimmed.find('{');
    let end = trimmed.rfind('}');
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ParseError::NoJsonObject {
            snippet: snippet(trimmed),
        });
    };
    if end < start {
        return Err(ParseError::NoJsonObject {
            snippet: snippet(trimmed),
        });
    }

    serde_json::from_str(&trimmed[start..=end]).map_err(|error| ParseError::InvalidJson {
        message: error.to_string(),
    })
}

fn snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_LEN {
        return text.to_owned();
    }
    let truncated: String = text.chars().take(SNIPPET_LEN).collect();
    format!("{truncated}…")
}
