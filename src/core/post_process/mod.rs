//! Post-processors applied to the draft catalog before it is compiled.
//!
//! Each processor receives the draft plus the collections it was built from
//! (`extracted` keys of this run, `existing` catalog entries) and returns the
//! next draft.

pub mod default_value;
pub mod purge_obsolete;
pub mod sort_by_key;
pub mod strip_prefix;

use enum_dispatch::enum_dispatch;

use crate::core::collection::TranslationCollection;

pub use default_value::{KeyAsDefaultValue, KeyAsInitialDefaultValue, StringAsDefaultValue};
pub use purge_obsolete::PurgeObsoleteKeys;
pub use sort_by_key::SortByKey;
pub use strip_prefix::StripPrefix;

#[enum_dispatch]
pub trait PostProcess {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn process(
        &self,
        draft: TranslationCollection,
        extracted: &TranslationCollection,
        existing: &TranslationCollection,
    ) -> TranslationCollection;
}

#[enum_dispatch(PostProcess)]
#[derive(Debug, Clone)]
pub enum PostProcessor {
    StripPrefix(StripPrefix),
    PurgeObsoleteKeys(PurgeObsoleteKeys),
    KeyAsInitialDefaultValue(KeyAsInitialDefaultValue),
    KeyAsDefaultValue(KeyAsDefaultValue),
    StringAsDefaultValue(StringAsDefaultValue),
    SortByKey(SortByKey),
}

/// Runs `processors` in order.
pub fn run_all(
    processors: &[PostProcessor],
    draft: TranslationCollection,
    extracted: &TranslationCollection,
    existing: &TranslationCollection,
) -> TranslationCollection {
    processors.iter().fold(draft, |draft, processor| {
        tracing::debug!(processor = processor.name(), keys = draft.len(), "post-processing");
        processor.process(draft, extracted, existing)
    })
}
