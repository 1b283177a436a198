//! Translation key extraction from parsed templates.
//!
//! - `flatten`: string literals reachable from an expression
//! - `walker`: marked elements and root expressions of a node tree
//! - `directive`: keys of elements carrying a marker attribute
//! - `pipe`: operands of translate pipe invocations
//!
//! [`TemplateExtractor`] ties them together for one source file.

pub mod directive;
pub mod flatten;
pub mod pipe;
pub mod walker;


use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::collection::TranslationCollection;
use crate::core::parsers::{ParseError, TemplateParser, inline_template, is_component_path};

pub use directive::{DEFAULT_MARKER, DirectiveExtractor};
pub use flatten::{Flatten, flatten};
pub use pipe::{DEFAULT_PIPE, PipeExtractor};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Extracts translation keys from one template source with both the pipe and
/// the marker attribute extractor.
#[derive(Debug, Clone)]
pub struct TemplateExtractor<P> {
    parser: P,
    pipe: PipeExtractor,
    directive: DirectiveExtractor,
}

impl<P: TemplateParser> TemplateExtractor<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            pipe: PipeExtractor::default(),
            directive: DirectiveExtractor::default(),
        }
    }

    pub fn with_marker_names(mut self, marker_names: Vec<String>) -> Self {
        self.directive = DirectiveExtractor::new(marker_names);
        self
    }

    pub fn with_pipe_names(mut self, pipe_names: Vec<String>) -> Self {
        self.pipe = PipeExtractor::new(pipe_names);
        self
    }

    /// Keys found in `source`.
    ///
    /// For `*.component.ts` files the inline template is extracted first; a
    /// component without one yields an empty collection. Parse failures are
    /// returned, never swallowed.
    pub fn extract(
        &self,
        source: &str,
        file_path: &Path,
    ) -> Result<TranslationCollection, ExtractError> {
        let inline;
        let template = if is_component_path(file_path) {
            inline = inline_template(source, file_path)?;
            match &inline {
                Some(template) => template.as_str(),
                None => {
                    debug!(file = %file_path.display(), "no inline template");
                    return Ok(TranslationCollection::new());
                }
            }
        } else {
            source
        };

        let nodes = self.parser.parse(template, file_path)?;
        let collection = self.pipe.extract(&nodes, TranslationCollection::new());
        let collection = self.directive.extract(&nodes, collection);

        debug!(file = %file_path.display(), keys = collection.len(), "extracted");
        Ok(collection)
    }
}
