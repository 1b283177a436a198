//! Template and expression trees handed to the extractors by a parser.
//!
//! - `template`: element, text and control-flow block nodes
//! - `expression`: binding expressions (literals, pipes, ternaries, ...)

pub mod expression;
pub mod template;

pub use expression::{Expr, LiteralMapKey, Primitive};
pub use template::{
    BlockBody, BoundAttribute, BoundEvent, BoundText, Comment, DeferredBlock, Element,
    ElementKind, ForLoopBlock, IfBlock, IfBlockBranch, LetDeclaration, Node, SwitchBlock,
    SwitchBlockCase, Text, TextAttribute,
};
