//! Pipe invocation extraction (`{{ 'KEY' | translate }}`).

use crate::core::ast::{Expr, Node};
use crate::core::collection::TranslationCollection;
use crate::core::extract::flatten::Flatten;
use crate::core::extract::walker::expressions;

/// Pipe name used when none is configured.
pub const DEFAULT_PIPE: &str = "translate";

#[derive(Debug, Clone)]
pub struct PipeExtractor {
    pipe_names: Vec<String>,
}

impl PipeExtractor {
    /// An empty `pipe_names` list falls back to [`DEFAULT_PIPE`].
    pub fn new(pipe_names: Vec<String>) -> Self {
        let pipe_names = if pipe_names.is_empty() {
            vec![DEFAULT_PIPE.to_string()]
        } else {
            pipe_names
        };
        Self { pipe_names }
    }

    pub fn pipe_names(&self) -> &[String] {
        &self.pipe_names
    }

    /// Adds the keys of every matching pipe under `nodes` to `collection`.
    pub fn extract(&self, nodes: &[Node], collection: TranslationCollection) -> TranslationCollection {
        expressions(nodes).into_iter().fold(collection, |collection, root| {
            collection.add_keys(self.extract_from_expression(root))
        })
    }

    /// String literal operands of matching pipes anywhere under `root`.
    ///
    /// Arguments of a matching pipe are searched for further pipes but never
    /// become keys themselves.
    pub fn extract_from_expression<'a>(&self, root: &'a Expr) -> Vec<&'a str> {
        let mut keys = Vec::new();
        let mut stack = vec![root];

        while let Some(expr) = stack.pop() {
            if let Expr::Pipe { exp, name, .. } = expr
                && self.pipe_names.contains(name)
            {
                keys.extend(Flatten::value_only().literals(exp));
            }
            stack.extend(expr.sub_expressions().into_iter().rev());
        }

        keys
    }
}

impl Default for PipeExtractor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
