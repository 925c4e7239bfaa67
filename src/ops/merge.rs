//! Recursive structural merge of an overlay into a translation document.

use std::ops::AddAssign;

use serde_json::Value;

use crate::document::Document;

/// Counts of keys written by a [`deep_merge`] call.
///
/// Only keys where a value was assigned are counted; a nested mapping that is
/// merged recursively contributes the counts of its own children instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    /// Keys the base did not have
    pub added: usize,
    /// Keys whose value was replaced by a different one
    pub updated: usize,
    /// Keys whose overlay value equals the existing one
    pub unchanged: usize,
}

impl MergeStats {
    /// Number of keys whose value actually changed.
    #[must_use]
    pub const fn changed(&self) -> usize {
        self.added + self.updated
    }
}

impl AddAssign for MergeStats {
    fn add_assign(&mut self, rhs: Self) {
        self.added += rhs.added;
        self.updated += rhs.updated;
        self.unchanged += rhs.unchanged;
    }
}

/// Merge `overlay` into `base` in place.
///
/// Where both sides hold a mapping under the same key, the mappings are merged
/// recursively. Otherwise the overlay value replaces the base value outright,
/// including when the two sides disagree on type (mapping vs leaf, either way).
/// Keys that exist only in `base` are left untouched; new keys are appended.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use locale_tools::ops::deep_merge;
///
/// let mut base = json!({"a": {"x": "1"}}).as_object().cloned().unwrap_or_default();
/// let overlay = json!({"a": {"y": "2"}}).as_object().cloned().unwrap_or_default();
///
/// deep_merge(&mut base, &overlay);
/// assert_eq!(serde_json::Value::Object(base), json!({"a": {"x": "1", "y": "2"}}));
/// ```
pub fn deep_merge(base: &mut Document, overlay: &Document) -> MergeStats {
    let mut stats = MergeStats::default();

    for (key, overlay_value) in overlay {
        match (base.get_mut(key), overlay_value) {
            (Some(Value::Object(base_child)), Value::Object(overlay_child)) => {
                stats += deep_merge(base_child, overlay_child);
            }
            (Some(existing), _) => {
                if existing == overlay_value {
                    stats.unchanged += 1;
                } else {
                    existing.clone_from(overlay_value);
                    stats.updated += 1;
                }
            }
            (None, _) => {
                base.insert(key.clone(), overlay_value.clone());
                stats.added += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::document;

    #[rstest]
    fn merges_nested_mappings() {
        let mut base = document(json!({"a": {"x": "1"}}));
        let overlay = document(json!({"a": {"y": "2"}}));

        let stats = deep_merge(&mut base, &overlay);

        assert_eq!(base, document(json!({"a": {"x": "1", "y": "2"}})));
        assert_eq!(stats, MergeStats { added: 1, updated: 0, unchanged: 0 });
    }

    #[rstest]
    fn overlay_leaf_wins() {
        let mut base = document(json!({"k": "old"}));
        let overlay = document(json!({"k": "new"}));

        let stats = deep_merge(&mut base, &overlay);

        assert_eq!(base, document(json!({"k": "new"})));
        assert_eq!(stats.updated, 1);
    }

    #[rstest]
    #[case::scalar_replaces_mapping(json!({"k": {"nested": "v"}}), json!({"k": "flat"}), json!({"k": "flat"}))]
    #[case::mapping_replaces_scalar(json!({"k": "flat"}), json!({"k": {"nested": "v"}}), json!({"k": {"nested": "v"}}))]
    #[case::new_key_is_added(json!({"a": "1"}), json!({"b": {"c": "2"}}), json!({"a": "1", "b": {"c": "2"}}))]
    #[case::empty_overlay(json!({"a": "1"}), json!({}), json!({"a": "1"}))]
    fn overlay_type_wins_on_mismatch(
        #[case] base: Value,
        #[case] overlay: Value,
        #[case] expected: Value,
    ) {
        let mut base = document(base);

        deep_merge(&mut base, &document(overlay));

        assert_eq!(base, document(expected));
    }

    #[rstest]
    fn base_only_keys_are_preserved() {
        let mut base = document(json!({
            "common": {"copy": "Копировать", "share": "Поделиться"},
            "quran": {"title": "Коран"}
        }));
        let overlay = document(json!({"common": {"share": "Отправить"}}));

        deep_merge(&mut base, &overlay);

        assert_eq!(
            base,
            document(json!({
                "common": {"copy": "Копировать", "share": "Отправить"},
                "quran": {"title": "Коран"}
            }))
        );
    }

    #[rstest]
    fn merge_is_idempotent() {
        let original = document(json!({
            "common": {"copy": "Copy"},
            "category": {"all": "All", "dua": "Old"},
            "ai": "flat"
        }));
        let overlay = document(json!({
            "category": {"dua": "Dua", "quranRecitation": "Quran recitation"},
            "ai": {"welcomeTitle": "Ask me anything"}
        }));

        let mut once = original.clone();
        deep_merge(&mut once, &overlay);
        let mut twice = once.clone();
        let second = deep_merge(&mut twice, &overlay);

        assert_eq!(once, twice);
        assert_eq!(second.changed(), 0);
        assert_that!(second.unchanged, gt(0));
    }

    #[rstest]
    fn existing_keys_keep_position_and_new_keys_append() {
        let mut base = document(json!({"first": "1", "second": "2"}));
        let overlay = document(json!({"third": "3", "first": "one"}));

        deep_merge(&mut base, &overlay);

        let keys: Vec<&str> = base.keys().map(String::as_str).collect();
        assert_eq!(keys, ["first", "second", "third"]);
    }

    #[rstest]
    fn stats_accumulate_across_levels() {
        let mut base = document(json!({
            "library": {"favorite": "Fav", "artist": "Artist"},
            "common": {"play": "Play"}
        }));
        let overlay = document(json!({
            "library": {"favorite": "Favorites", "artist": "Artist", "duration": "Duration"},
            "common": {"pause": "Pause", "stop": "Stop"}
        }));

        let stats = deep_merge(&mut base, &overlay);

        assert_eq!(stats, MergeStats { added: 3, updated: 1, unchanged: 1 });
        assert_that!(stats.changed(), eq(4));
    }
}
