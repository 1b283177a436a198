use crate::core::collection::TranslationCollection;
use crate::core::post_process::PostProcess;

/// Drops catalog entries whose key was not extracted in this run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurgeObsoleteKeys;

impl PostProcess for PurgeObsoleteKeys {
    fn name(&self) -> &'static str {
        "purge-obsolete-keys"
    }

    fn process(
        &self,
        draft: TranslationCollection,
        extracted: &TranslationCollection,
        _existing: &TranslationCollection,
    ) -> TranslationCollection {
        draft.intersect(extracted)
    }
}
