//! Removal of corrupted numeric keys from a nested mapping.

use serde_json::Value;

use crate::document::Document;

/// Returns true for a non-empty key made only of ASCII decimal digits.
#[must_use]
pub fn is_numeric_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Remove every direct child whose key is numeric.
///
/// Nested mappings are not descended into. Remaining keys keep their order.
///
/// # Returns
/// Number of removed keys
pub fn remove_numeric_keys(map: &mut Document) -> usize {
    let before = map.len();
    map.retain(|key, _| !is_numeric_key(key));
    before - map.len()
}

/// Remove numeric keys from the mapping found at `path` inside `document`.
///
/// An empty path targets the document root. If any segment is missing or does
/// not hold a mapping, nothing is changed and 0 is returned.
pub fn sanitize_at_path<S: AsRef<str>>(document: &mut Document, path: &[S]) -> usize {
    let mut target = document;
    for segment in path {
        match target.get_mut(segment.as_ref()) {
            Some(Value::Object(child)) => target = child,
            _ => {
                tracing::debug!(segment = segment.as_ref(), "Sanitize target not present");
                return 0;
            }
        }
    }

    remove_numeric_keys(target)
}
