//! Extraction engine.
//!
//! - `ast`: template and expression trees supplied by a parser
//! - `parsers`: turn source files into trees
//! - `extract`: find translation keys in a tree
//! - `collection`: ordered key/value accumulator
//! - `post_process`: reshape a catalog draft
//! - `compilers`: read and write catalog files
//! - `file_scanner` / `context`: the extraction task over a project

pub mod ast;
pub mod collection;
pub mod compilers;
pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod post_process;

pub use collection::{MergePolicy, TranslationCollection};
pub use context::ExtractContext;
pub use extract::{ExtractError, TemplateExtractor};
