//! Label containers shared by every property record.

use std::collections::VecDeque;

/// Reserved language key for labels that carry no language tag.
///
/// Kept distinct from "no entry": a map without this key simply has no
/// untagged label.
pub const NO_LANGUAGE: &str = "none";

/// Language code (or [`NO_LANGUAGE`]) → label text.
pub type LabelMap = hashbrown::HashMap<String, String>;

/// Ordered labels for a single identifier. Both ends are writable.
pub type LabelList = VecDeque<String>;

/// Append every label of `incoming` that `target` does not already hold,
/// keeping the incoming order. Returns how many were appended.
pub(crate) fn merge_list(target: &mut LabelList, incoming: &LabelList) -> usize {
    let mut added = 0;
    for label in incoming {
        if !target.contains(label) {
            target.push_back(label.clone());
            added += 1;
        }
    }
    added
}

/// Copy entries for languages `target` has no label for yet.
pub(crate) fn merge_map(target: &mut LabelMap, incoming: &LabelMap) -> usize {
    let mut added = 0;
    for (lang, label) in incoming {
        if !target.contains_key(lang) {
            target.insert(lang.clone(), label.clone());
            added += 1;
        }
    }
    added
}
