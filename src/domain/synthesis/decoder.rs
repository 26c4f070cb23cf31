//! Response decoder - recovers the JSON object embedded in a model reply.
//!
//! Model replies carry no schema guarantee. This decoder is the single
//! point where free-form generations become structured sections, and it
//! never fails: anything it cannot read decodes to an empty mapping.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Greedy span from the first `{` to the last `}`.
static OBJECT_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("static regex"));

/// Decodes the first embedded JSON object in `reply`.
///
/// Returns an empty map when no span is found, the span is not valid JSON,
/// or the JSON is not an object. Missing section keys are not injected.
pub fn decode_sections(reply: &str) -> Map<String, Value> {
    let Some(span) = OBJECT_SPAN.find(reply) else {
        tracing::debug!("model reply contains no JSON object span");
        return Map::new();
    };

    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "model reply JSON is not an object");
            Map::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse model reply as JSON");
            Map::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn decodes_reply_with_preamble() {
        let reply = "Here you go:\n{\"vision\":\"See far\",\"mission\":\"TBD\"}";
        let decoded = decode_sections(reply);

        assert_eq!(Value::Object(decoded), json!({"vision": "See far", "mission": "TBD"}));
    }

    #[test]
    fn decodes_canonical_seven_key_object_exactly() {
        let canonical = json!({
            "vision": "A world of makers",
            "mission": "Tools for makers",
            "strategy": "Start with hobbyists",
            "objectives": ["10k users"],
            "priorities": ["Onboarding"],
            "culture": "Curious",
            "values": [{"label": "Craft", "description": "Sweat details"}]
        });
        let reply = serde_json::to_string_pretty(&canonical).unwrap();

        assert_eq!(Value::Object(decode_sections(&reply)), canonical);
    }

    #[test]
    fn tolerates_code_fences_and_trailing_commentary() {
        let reply = "```json\n{\"culture\": \"Open\"}\n```\nLet me know!";
        let decoded = decode_sections(reply);
        assert_eq!(decoded.get("culture"), Some(&json!("Open")));
    }

    #[test]
    fn missing_braces_decode_to_empty() {
        assert!(decode_sections("").is_empty());
        assert!(decode_sections("I could not find anything useful.").is_empty());
        assert!(decode_sections("{\"vision\": \"unterminated\"").is_empty());
        assert!(decode_sections("\"vision\": \"x\"}").is_empty());
    }

    #[test]
    fn two_objects_span_greedily_and_fail() {
        let reply = "{\"vision\":\"a\"} and also {\"mission\":\"b\"}";
        assert!(decode_sections(reply).is_empty());
    }

    #[test]
    fn non_object_json_decodes_to_empty() {
        assert!(decode_sections("[1, 2, 3]").is_empty());
        assert!(decode_sections("\"just a string\"").is_empty());
    }

    #[test]
    fn object_inside_array_is_recovered() {
        // The span covers only the braces, so the surrounding brackets are ignored.
        let decoded = decode_sections("[{\"vision\": \"x\"}]");
        assert_eq!(decoded.get("vision"), Some(&json!("x")));
    }

    proptest! {
        #[test]
        fn never_panics_on_arbitrary_input(reply in "\\PC*") {
            let _ = decode_sections(&reply);
        }

        #[test]
        fn replies_without_open_brace_decode_empty(reply in "[^{]*") {
            prop_assert!(decode_sections(&reply).is_empty());
        }
    }
}
