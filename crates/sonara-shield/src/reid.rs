//! Re-identification of model output.
//!
//! Placeholders are restored by literal substitution. A placeholder the map
//! does not know — typically one the model invented — is left verbatim and
//! logged; re-identification must never block a response.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::warn;

use sonara_core::models::deid::DeidentificationMap;

/// Anything shaped like a placeholder, mapped or not.
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[A-Z]+_\d+\]").unwrap());

/// Restore original values for every mapped placeholder in `text`.
pub fn reidentify(text: &str, map: &DeidentificationMap) -> String {
    PLACEHOLDER_PATTERN
        .replace_all(text, |caps: &Captures| {
            let placeholder = &caps[0];
            match map.original_for(placeholder) {
                Some(original) => original.to_string(),
                None => {
                    warn!(placeholder, "unmapped placeholder left unchanged");
                    placeholder.to_string()
                }
            }
        })
        .into_owned()
}

/// Restore placeholders recursively through a structured model result:
/// every string in nested objects and arrays is re-identified in place.
pub fn reidentify_value(value: &mut serde_json::Value, map: &DeidentificationMap) {
    match value {
        serde_json::Value::String(s) => {
            *s = reidentify(s, map);
        }
        serde_json::Value::Array(items) => {
            for item in items {
                reidentify_value(item, map);
            }
        }
        serde_json::Value::Object(fields) => {
            for (_, field) in fields {
                reidentify_value(field, map);
            }
        }
        _ => {}
    }
}
