use std::cmp::Ordering;

use crate::core::collection::TranslationCollection;
use crate::core::post_process::PostProcess;

/// Sorts keys case-insensitively; keys equal up to case are ordered by their
/// exact bytes, so `A` comes before `a`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortByKey;

pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl PostProcess for SortByKey {
    fn name(&self) -> &'static str {
        "sort-by-key"
    }

    fn process(
        &self,
        draft: TranslationCollection,
        _extracted: &TranslationCollection,
        _existing: &TranslationCollection,
    ) -> TranslationCollection {
        draft.sort_by(compare_keys)
    }
}
