use serde_json::Value;

use crate::core::feedback::FeedbackRecord;
use crate::core::Severity;

const FALLBACK_REPHRASING: &str =
    "Let's explore how we can enhance this aspect of the code together.";
const FALLBACK_RATIONALE: &str = "The model reply could not be parsed into structured feedback. The underlying suggestion still follows software engineering best practices for maintainable, readable code.";
const FALLBACK_IMPROVEMENT: &str =
    "Revisit this section and apply the reviewer's suggestion as a small, focused change.";

// Never fails: a reply that cannot be decoded degrades to a complete record
// built from fixed placeholders, salvaging any field that did decode.
pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(raw: &str, comment: &str, severity: Severity, language: &str) -> FeedbackRecord {
        let stripped = strip_fences(raw);
        let payload = extract_object(stripped)
            .and_then(|span| serde_json::from_str::<Value>(span).ok())
            .unwrap_or(Value::Null);

        FeedbackRecord {
            positive_rephrasing: field_or(&payload, &["positive_rephrasing"], FALLBACK_REPHRASING),
            rationale: field_or(&payload, &["rationale", "the_why"], FALLBACK_RATIONALE),
            suggested_improvement: field_or(
                &payload,
                &["suggested_improvement"],
                FALLBACK_IMPROVEMENT,
            ),
            resource_link: field_or(&payload, &["resource_link"], fallback_resource(language)),
            raw_comment: comment.to_string(),
            severity,
        }
    }

    // Used by the pipeline when the model call itself failed.
    pub fn fallback_record(comment: &str, severity: Severity, language: &str) -> FeedbackRecord {
        FeedbackRecord {
            positive_rephrasing: FALLBACK_REPHRASING.to_string(),
            rationale: "The model was unavailable for this comment. The reviewer's point still deserves a look; the suggestion below is a generic starting place.".to_string(),
            suggested_improvement: FALLBACK_IMPROVEMENT.to_string(),
            resource_link: fallback_resource(language).to_string(),
            raw_comment: comment.to_string(),
            severity,
        }
    }
}

fn field_or(payload: &Value, keys: &[&str], fallback: &str) -> String {
    keys.iter()
        .filter_map(|key| payload.get(key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

fn fallback_resource(language: &str) -> &'static str {
    if language == "python" {
        "https://docs.python.org/3/tutorial/"
    } else {
        "https://developer.mozilla.org/"
    }
}

// Drops a leading fence marker (with optional info string, e.g. ```json) and
// its matching trailing marker. Anything fancier is left to the brace scan.
fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    for marker in ["```", "~~~"] {
        if let Some(rest) = text.strip_prefix(marker) {
            text = match rest.find('\n') {
                Some(newline) => &rest[newline + 1..],
                None => rest,
            };
            text = text.trim();
            if let Some(body) = text.strip_suffix(marker) {
                text = body.trim();
            }
            break;
        }
    }

    text
}

// First top-level balanced {...} span. Brace depth is tracked and braces
// inside quoted strings are ignored; prose outside the span is discarded.
fn extract_object(text: &str) -> Option<&str> {
    let mut start = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' if start.is_some() => in_string = true,
            '{' => {
                if start.is_none() {
                    start = Some(index);
                }
                depth += 1;
            }
            '}' => {
                if let Some(open) = start {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[open..=index]);
                    }
                }
            }
            _ => {}
        }
    }

    None
}
