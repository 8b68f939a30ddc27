use wiremock::matchers::{method, path_regex};
use wiremock::MockBuilder;

pub const GENERATE_CONTENT_PATH_REGEX: &str = r"/v1beta/models/.+:generateContent";

pub fn post_path_regex(path: &str) -> MockBuilder {
    wiremock::Mock::given(method("POST")).and(path_regex(path))
}

/// Response body carrying the given parts in a single candidate.
pub fn candidate_with_parts(parts: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }]
    })
}
