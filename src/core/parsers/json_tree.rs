use std::path::Path;

use serde::Deserialize;

use crate::core::ast::Node;
use crate::core::parsers::{ParseError, TemplateParser};

/// File suffix of serialized node trees.
pub const TREE_SUFFIX: &str = ".ast.json";

pub fn is_tree_path(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|path| path.ends_with(TREE_SUFFIX))
}

/// Reads a template that is already a serialized node tree (a JSON array of
/// nodes).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTreeParser;

impl TemplateParser for JsonTreeParser {
    fn parse(&self, template: &str, file_path: &Path) -> Result<Vec<Node>, ParseError> {
        parse_tree(template).map_err(|source| ParseError::Tree {
            path: file_path.display().to_string(),
            source,
        })
    }
}

/// Deserializes a node tree without serde_json's nesting limit; callers run on
/// threads with an enlarged stack.
pub(crate) fn parse_tree(json: &str) -> Result<Vec<Node>, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let nodes = Vec::<Node>::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(nodes)
}
