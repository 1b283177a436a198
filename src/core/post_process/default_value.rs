//! Default value post-processors.

use crate::core::collection::TranslationCollection;
use crate::core::post_process::PostProcess;

/// Empty values are replaced with their key.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyAsDefaultValue;

impl PostProcess for KeyAsDefaultValue {
    fn name(&self) -> &'static str {
        "key-as-default-value"
    }

    fn process(
        &self,
        draft: TranslationCollection,
        _extracted: &TranslationCollection,
        _existing: &TranslationCollection,
    ) -> TranslationCollection {
        draft.map_values(|key, value| {
            if value.is_empty() {
                key.to_string()
            } else {
                value.to_string()
            }
        })
    }
}

/// Keys new to the catalog get their key as value; keys already in the
/// catalog keep their value, and an empty one stays empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyAsInitialDefaultValue;

impl PostProcess for KeyAsInitialDefaultValue {
    fn name(&self) -> &'static str {
        "key-as-initial-default-value"
    }

    fn process(
        &self,
        draft: TranslationCollection,
        _extracted: &TranslationCollection,
        existing: &TranslationCollection,
    ) -> TranslationCollection {
        draft.map_values(|key, value| match existing.get(key) {
            Some(existing) => existing.to_string(),
            None if value.is_empty() => key.to_string(),
            None => value.to_string(),
        })
    }
}

/// Empty values are replaced with a fixed string.
#[derive(Debug, Clone, Default)]
pub struct StringAsDefaultValue {
    value: String,
}

impl StringAsDefaultValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl PostProcess for StringAsDefaultValue {
    fn name(&self) -> &'static str {
        "string-as-default-value"
    }

    fn process(
        &self,
        draft: TranslationCollection,
        _extracted: &TranslationCollection,
        _existing: &TranslationCollection,
    ) -> TranslationCollection {
        draft.map_values(|_, value| {
            if value.is_empty() {
                self.value.clone()
            } else {
                value.to_string()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_key_as_default_value() {
        let draft = TranslationCollection::from_values([("HELLO", ""), ("BYE", "Goodbye")]);
        let empty = TranslationCollection::new();
        let result = KeyAsDefaultValue.process(draft, &empty, &empty);
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            vec![("HELLO", "HELLO"), ("BYE", "Goodbye")]
        );
    }

    #[test]
    fn test_key_as_initial_default_value_only_for_new_keys() {
        let existing = TranslationCollection::from_values([("OLD", ""), ("KEPT", "Kept")]);
        let draft =
            TranslationCollection::from_values([("OLD", ""), ("KEPT", "Kept"), ("NEW", "")]);
        let result =
            KeyAsInitialDefaultValue.process(draft, &TranslationCollection::new(), &existing);
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            vec![("OLD", ""), ("KEPT", "Kept"), ("NEW", "NEW")]
        );
    }

    #[test]
    fn test_string_as_default_value() {
        let draft = TranslationCollection::from_values([("A", ""), ("B", "b")]);
        let empty = TranslationCollection::new();
        let result = StringAsDefaultValue::new("TODO").process(draft, &empty, &empty);
        assert_eq!(result.get("A"), Some("TODO"));
        assert_eq!(result.get("B"), Some("b"));
    }
}
