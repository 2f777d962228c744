//! Extraction of the JSON array embedded in a model reply.

use serde_json::Value;

use super::GenerationError;

/// Pulls the JSON array out of free-form reply text.
///
/// The reply is trimmed, then everything from the first `[` through the
/// last `]` is parsed. The elements are returned untyped; callers run them
/// through [`crate::domain::validate_sequence`].
///
/// # Errors
///
/// Returns [`GenerationError::MalformedResponse`], carrying the original
/// reply, when there is no bracketed span, the span is not valid JSON, or
/// it does not parse to an array.
pub fn extract_json_array(reply: &str) -> Result<Vec<Value>, GenerationError> {
    let malformed = |reason: String| GenerationError::MalformedResponse {
        reason,
        reply: reply.to_string(),
    };

    let trimmed = reply.trim();
    let span = trimmed
        .find('[')
        .zip(trimmed.rfind(']'))
        .and_then(|(start, end)| trimmed.get(start..=end))
        .ok_or_else(|| malformed("no JSON array found in response".to_string()))?;

    match serde_json::from_str::<Value>(span) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(malformed("response must be a JSON array".to_string())),
        Err(e) => Err(malformed(format!("invalid JSON in response: {e}"))),
    }
}
