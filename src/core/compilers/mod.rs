//! Translation catalog compilers.
//!
//! A compiler turns a [`TranslationCollection`] into the text of a catalog
//! file and reads such a file back:
//! - `json`: flat `{ "key": "value" }` objects
//! - `namespaced_json`: dotted keys become nested objects

pub mod json;
pub mod namespaced_json;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::collection::TranslationCollection;
use crate::utils::strip_bom;

pub use json::JsonCompiler;
pub use namespaced_json::NamespacedJsonCompiler;

/// Default indentation of compiled catalogs.
pub const DEFAULT_INDENTATION: &str = "\t";

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("root of a translation file must be an object")]
    NotAnObject,

    #[error("compiled output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes and deserializes a catalog format.
#[enum_dispatch]
pub trait Compiler {
    fn compile(&self, collection: &TranslationCollection) -> Result<String, CompileError>;

    fn parse(&self, contents: &str) -> Result<TranslationCollection, CompileError>;

    /// File extension of the format, without the dot.
    fn extension(&self) -> &'static str;
}

#[enum_dispatch(Compiler)]
#[derive(Debug, Clone)]
pub enum CatalogCompiler {
    Json(JsonCompiler),
    NamespacedJson(NamespacedJsonCompiler),
}

/// Catalog format selected by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Json,
    NamespacedJson,
}

/// Formatting options shared by the JSON based compilers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFormat {
    pub indentation: String,
    pub newline_at_end_of_file: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self {
            indentation: DEFAULT_INDENTATION.to_string(),
            newline_at_end_of_file: true,
        }
    }
}

impl CatalogCompiler {
    pub fn new(format: OutputFormat, options: JsonFormat) -> Self {
        match format {
            OutputFormat::Json => JsonCompiler::new(options).into(),
            OutputFormat::NamespacedJson => NamespacedJsonCompiler::new(options).into(),
        }
    }
}

/// Pretty-prints `value` with the configured indentation.
pub(crate) fn to_json(value: &Value, format: &JsonFormat) -> Result<String, CompileError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(format.indentation.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(out)?;
    if format.newline_at_end_of_file {
        json.push('\n');
    }
    Ok(json)
}

/// Reads a catalog object, flattening nested objects and arrays into dotted
/// keys. Non-string leaves are stringified; `null` becomes an empty value.
pub(crate) fn parse_flattened(contents: &str) -> Result<TranslationCollection, CompileError> {
    let contents = strip_bom(contents);
    if contents.trim().is_empty() {
        return Ok(TranslationCollection::new());
    }

    let value: Value = serde_json::from_str(contents)?;
    let Value::Object(root) = value else {
        return Err(CompileError::NotAnObject);
    };

    let mut collection = TranslationCollection::new();
    let mut stack: Vec<(String, Value)> = root.into_iter().rev().collect();
    while let Some((key, value)) = stack.pop() {
        match value {
            Value::Object(map) => {
                stack.extend(nested_entries(&key, map).rev());
            }
            Value::Array(items) => {
                let map: Map<String, Value> = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect();
                stack.extend(nested_entries(&key, map).rev());
            }
            Value::String(text) => collection = collection.add_with_value(key, text),
            Value::Null => collection = collection.add_with_value(key, ""),
            other => collection = collection.add_with_value(key, other.to_string()),
        }
    }
    Ok(collection)
}

fn nested_entries(
    prefix: &str,
    map: Map<String, Value>,
) -> impl DoubleEndedIterator<Item = (String, Value)> + '_ {
    map.into_iter()
        .map(move |(key, value)| (format!("{prefix}.{key}"), value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_flattened_nested_values() {
        let collection = parse_flattened(
            r#"{ "a": { "b": "B", "c": { "d": "D" } }, "n": 1, "t": true, "z": null, "l": ["x", "y"] }"#,
        )
        .unwrap();
        assert_eq!(
            collection.keys(),
            vec!["a.b", "a.c.d", "n", "t", "z", "l.0", "l.1"]
        );
        assert_eq!(collection.get("n"), Some("1"));
        assert_eq!(collection.get("t"), Some("true"));
        assert_eq!(collection.get("z"), Some(""));
        assert_eq!(collection.get("l.1"), Some("y"));
    }

    #[test]
    fn test_parse_flattened_strips_bom() {
        let collection = parse_flattened("\u{feff}{\"a\": \"A\"}").unwrap();
        assert_eq!(collection.get("a"), Some("A"));
    }

    #[test]
    fn test_parse_flattened_empty_file() {
        assert!(parse_flattened("").unwrap().is_empty());
        assert!(parse_flattened(" \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_flattened_rejects_non_objects() {
        assert!(matches!(
            parse_flattened("[1, 2]"),
            Err(CompileError::NotAnObject)
        ));
        assert!(matches!(parse_flattened("{"), Err(CompileError::Json(_))));
    }

    #[test]
    fn test_to_json_indentation_and_newline() {
        let value = serde_json::json!({ "a": "A" });
        let format = JsonFormat {
            indentation: "  ".to_string(),
            newline_at_end_of_file: false,
        };
        assert_eq!(to_json(&value, &format).unwrap(), "{\n  \"a\": \"A\"\n}");
        assert_eq!(
            to_json(&value, &JsonFormat::default()).unwrap(),
            "{\n\t\"a\": \"A\"\n}\n"
        );
    }

    #[test]
    fn test_catalog_compiler_from_format() {
        let compiler = CatalogCompiler::new(OutputFormat::Json, JsonFormat::default());
        assert!(matches!(compiler, CatalogCompiler::Json(_)));
        assert_eq!(compiler.extension(), "json");
    }
}
