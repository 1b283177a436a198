use serde_json::{Map, Value};
use tracing::warn;

use crate::core::collection::TranslationCollection;
use crate::core::compilers::{CompileError, Compiler, JsonFormat, parse_flattened, to_json};

/// Catalog where dotted keys are stored as nested objects:
/// `"HOME.TITLE"` is written as `{ "HOME": { "TITLE": ... } }`.
#[derive(Debug, Clone, Default)]
pub struct NamespacedJsonCompiler {
    format: JsonFormat,
}

impl NamespacedJsonCompiler {
    pub fn new(format: JsonFormat) -> Self {
        Self { format }
    }
}

impl Compiler for NamespacedJsonCompiler {
    fn compile(&self, collection: &TranslationCollection) -> Result<String, CompileError> {
        let mut root = Map::new();
        for (key, value) in collection.iter() {
            let parts: Vec<&str> = key.split('.').collect();
            insert_nested(&mut root, &parts, Value::String(value.to_string()));
        }
        to_json(&Value::Object(root), &self.format)
    }

    fn parse(&self, contents: &str) -> Result<TranslationCollection, CompileError> {
        parse_flattened(contents)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Insert a value at a nested path, creating intermediate objects as needed.
///
/// When a key is both a leaf and a namespace (`a` and `a.b`), the namespace
/// wins regardless of insertion order: a leaf in the way of an object is
/// replaced, and a leaf landing on an existing object is dropped.
fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for (depth, part) in parents.iter().enumerate() {
        let next = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !next.is_object() {
            warn!(
                key = %path[..=depth].join("."),
                "value replaced by nested keys"
            );
            *next = Value::Object(Map::new());
        }
        let Value::Object(map) = next else {
            return;
        };
        current = map;
    }

    if current.get(*last).is_some_and(Value::is_object) {
        warn!(key = %path.join("."), "value dropped, key is used as a namespace");
        return;
    }
    current.insert(last.to_string(), value);
}
