//! Template parser adapters.
//!
//! Raw markup is never parsed here. A [`TemplateParser`] turns template
//! source into the node tree of `crate::core::ast`:
//! - `json_tree`: the source already is a serialized node tree (`*.ast.json`)
//! - `command`: an external parser process is asked for the tree
//! - `component`: pulls the inline template out of a `*.component.ts` file

pub mod command;
pub mod component;
pub mod json_tree;

use std::path::Path;

use thiserror::Error;

use crate::core::ast::Node;

pub use command::CommandParser;
pub use component::{inline_template, is_component_path};
pub use json_tree::JsonTreeParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid template tree for {path}: {source}")]
    Tree {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to run parser command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parser command `{command}` failed for {path} ({status}): {stderr}")]
    Command {
        command: String,
        path: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("no parser command configured for {path}")]
    MissingCommand { path: String },

    #[error("failed to parse component source {path}: {message}")]
    Component { path: String, message: String },
}

/// Turns template source into a node tree.
pub trait TemplateParser: Sync {
    fn parse(&self, template: &str, file_path: &Path) -> Result<Vec<Node>, ParseError>;
}

/// Routes each file to the parser that understands it: serialized trees are
/// read directly, everything else goes through the external parser command.
#[derive(Debug, Clone, Default)]
pub struct FileParser {
    command: Option<CommandParser>,
}

impl FileParser {
    pub fn new(command: Option<CommandParser>) -> Self {
        Self { command }
    }

    pub fn has_command(&self) -> bool {
        self.command.is_some()
    }
}

impl TemplateParser for FileParser {
    fn parse(&self, template: &str, file_path: &Path) -> Result<Vec<Node>, ParseError> {
        if json_tree::is_tree_path(file_path) {
            return JsonTreeParser.parse(template, file_path);
        }
        match &self.command {
            Some(command) => command.parse(template, file_path),
            None => Err(ParseError::MissingCommand {
                path: file_path.display().to_string(),
            }),
        }
    }
}
