//! Helpers for reading JSON out of model replies.

/// Strip surrounding whitespace and an optional Markdown code fence.
///
/// Models occasionally wrap their JSON in a ```` ```json ```` block even when a
/// JSON response format is requested. Anything that is not fenced is returned
/// trimmed and otherwise untouched.
pub fn extract_json_payload(content: &str) -> &str {
    let trimmed = content.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. `json`) on the opening fence line.
    match body.split_once('\n') {
        Some((info, inner)) if !info.trim_start().starts_with('{') => inner.trim(),
        _ => body.trim(),
    }
}
