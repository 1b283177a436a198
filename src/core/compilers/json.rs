use serde_json::{Map, Value};

use crate::core::collection::TranslationCollection;
use crate::core::compilers::{CompileError, Compiler, JsonFormat, parse_flattened, to_json};

/// Flat `{ "key": "value" }` catalog. Nested files are flattened on read.
#[derive(Debug, Clone, Default)]
pub struct JsonCompiler {
    format: JsonFormat,
}

impl JsonCompiler {
    pub fn new(format: JsonFormat) -> Self {
        Self { format }
    }
}

impl Compiler for JsonCompiler {
    fn compile(&self, collection: &TranslationCollection) -> Result<String, CompileError> {
        let map: Map<String, Value> = collection
            .iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();
        to_json(&Value::Object(map), &self.format)
    }

    fn parse(&self, contents: &str) -> Result<TranslationCollection, CompileError> {
        parse_flattened(contents)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
