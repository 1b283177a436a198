use crate::core::collection::TranslationCollection;
use crate::core::post_process::PostProcess;

/// Removes a fixed prefix from every key that starts with it. When stripping
/// makes two keys collide, the first one keeps its value.
#[derive(Debug, Clone, Default)]
pub struct StripPrefix {
    prefix: String,
}

impl StripPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl PostProcess for StripPrefix {
    fn name(&self) -> &'static str {
        "strip-prefix"
    }

    fn process(
        &self,
        draft: TranslationCollection,
        _extracted: &TranslationCollection,
        _existing: &TranslationCollection,
    ) -> TranslationCollection {
        if self.prefix.is_empty() {
            return draft;
        }
        draft
            .into_iter()
            .fold(TranslationCollection::new(), |collection, (key, value)| {
                let key = key.strip_prefix(&self.prefix).unwrap_or(&key);
                // Stripped values that mirrored the prefixed key follow it.
                let value = value
                    .strip_prefix(&self.prefix)
                    .filter(|stripped| *stripped == key)
                    .unwrap_or(&value);
                if collection.has(key) {
                    collection
                } else {
                    collection.add_with_value(key, value)
                }
            })
    }
}
