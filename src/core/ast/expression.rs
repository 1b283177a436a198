//! Expression tree consumed by the extractors.
//!
//! Mirrors the shape of Angular's binding expression AST closely enough that an
//! external parser can serialize its output straight into these types. The
//! extractors never evaluate an expression; they only pattern-match on the
//! variants to discover string literals.

use serde::{Deserialize, Serialize};

/// A literal primitive value (`'text'`, `42`, `true`, `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// Key of a literal map entry (`{ key: value }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralMapKey {
    pub key: String,
    #[serde(default)]
    pub quoted: bool,
}

/// A binding expression node.
///
/// Composite variants own their sub-expressions, so a tree is dropped as a unit
/// once the parser output goes out of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Expr {
    /// Missing expression, e.g. a bare `[translate]` binding.
    Empty,
    ImplicitReceiver,
    ThisReceiver,
    LiteralPrimitive {
        value: Primitive,
    },
    /// `text {{ a }} more {{ b }}`: literal `strings` interleaved with `expressions`.
    Interpolation {
        #[serde(default)]
        strings: Vec<String>,
        expressions: Vec<Expr>,
    },
    LiteralArray {
        expressions: Vec<Expr>,
    },
    LiteralMap {
        keys: Vec<LiteralMapKey>,
        values: Vec<Expr>,
    },
    /// `exp | name: arg1 : arg2`
    Pipe {
        exp: Box<Expr>,
        name: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        true_exp: Box<Expr>,
        false_exp: Box<Expr>,
    },
    Binary {
        operation: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        receiver: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    SafeCall {
        receiver: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    PropertyRead {
        receiver: Box<Expr>,
        name: String,
    },
    SafePropertyRead {
        receiver: Box<Expr>,
        name: String,
    },
    KeyedRead {
        receiver: Box<Expr>,
        key: Box<Expr>,
    },
    PrefixNot {
        expression: Box<Expr>,
    },
    Unary {
        operator: String,
        expr: Box<Expr>,
    },
    NonNullAssert {
        expression: Box<Expr>,
    },
    Parenthesized {
        expression: Box<Expr>,
    },
    /// Statement chain of an event handler: `a(); b()`.
    Chain {
        expressions: Vec<Expr>,
    },
    /// Parser output root: the inner expression plus the text it was parsed from.
    WithSource {
        ast: Box<Expr>,
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        location: String,
    },
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Expr::LiteralPrimitive {
            value: Primitive::String(value.into()),
        }
    }

    pub fn number(value: f64) -> Self {
        Expr::LiteralPrimitive {
            value: Primitive::Number(value),
        }
    }

    pub fn null() -> Self {
        Expr::LiteralPrimitive {
            value: Primitive::Null,
        }
    }

    /// A bare identifier: a property read on the implicit component receiver.
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::PropertyRead {
            receiver: Box::new(Expr::ImplicitReceiver),
            name: name.into(),
        }
    }

    pub fn property(receiver: Expr, name: impl Into<String>) -> Self {
        Expr::PropertyRead {
            receiver: Box::new(receiver),
            name: name.into(),
        }
    }

    pub fn pipe(exp: Expr, name: impl Into<String>) -> Self {
        Self::pipe_with_args(exp, name, Vec::new())
    }

    pub fn pipe_with_args(exp: Expr, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Pipe {
            exp: Box::new(exp),
            name: name.into(),
            args,
        }
    }

    pub fn conditional(condition: Expr, true_exp: Expr, false_exp: Expr) -> Self {
        Expr::Conditional {
            condition: Box::new(condition),
            true_exp: Box::new(true_exp),
            false_exp: Box::new(false_exp),
        }
    }

    pub fn binary(operation: impl Into<String>, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            operation: operation.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Call of a named function on the implicit receiver: `name(args)`.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            receiver: Box::new(Expr::ident(name)),
            args,
        }
    }

    pub fn array(expressions: Vec<Expr>) -> Self {
        Expr::LiteralArray { expressions }
    }

    pub fn map<K: Into<String>>(entries: Vec<(K, Expr)>) -> Self {
        let (keys, values) = entries
            .into_iter()
            .map(|(key, value)| {
                (
                    LiteralMapKey {
                        key: key.into(),
                        quoted: false,
                    },
                    value,
                )
            })
            .unzip();
        Expr::LiteralMap { keys, values }
    }

    pub fn interpolation(expressions: Vec<Expr>) -> Self {
        Expr::Interpolation {
            strings: Vec::new(),
            expressions,
        }
    }

    pub fn paren(expression: Expr) -> Self {
        Expr::Parenthesized {
            expression: Box::new(expression),
        }
    }

    pub fn with_source(ast: Expr, source: impl Into<String>) -> Self {
        Expr::WithSource {
            ast: Box::new(ast),
            source: Some(source.into()),
            location: String::new(),
        }
    }

    /// Returns the string value if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::LiteralPrimitive {
                value: Primitive::String(value),
            } => Some(value),
            _ => None,
        }
    }

    /// True for a missing expression, looking through source wrappers.
    pub fn is_empty(&self) -> bool {
        let mut current = self;
        loop {
            match current {
                Expr::Empty => return true,
                Expr::WithSource { ast, .. } => current = ast,
                _ => return false,
            }
        }
    }

    /// Direct sub-expressions in source order.
    ///
    /// Pipe arguments are included: a translate pipe may itself appear inside
    /// the argument of another pipe.
    pub fn sub_expressions(&self) -> Vec<&Expr> {
        match self {
            Expr::Empty
            | Expr::ImplicitReceiver
            | Expr::ThisReceiver
            | Expr::LiteralPrimitive { .. } => Vec::new(),
            Expr::Interpolation { expressions, .. }
            | Expr::LiteralArray { expressions }
            | Expr::Chain { expressions } => expressions.iter().collect(),
            Expr::LiteralMap { values, .. } => values.iter().collect(),
            Expr::Pipe { exp, args, .. } => {
                std::iter::once(exp.as_ref()).chain(args.iter()).collect()
            }
            Expr::Conditional {
                condition,
                true_exp,
                false_exp,
            } => vec![condition.as_ref(), true_exp.as_ref(), false_exp.as_ref()],
            Expr::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Expr::Call { receiver, args } | Expr::SafeCall { receiver, args } => {
                std::iter::once(receiver.as_ref()).chain(args.iter()).collect()
            }
            Expr::PropertyRead { receiver, .. } | Expr::SafePropertyRead { receiver, .. } => {
                vec![receiver.as_ref()]
            }
            Expr::KeyedRead { receiver, key } => vec![receiver.as_ref(), key.as_ref()],
            Expr::PrefixNot { expression }
            | Expr::NonNullAssert { expression }
            | Expr::Parenthesized { expression } => vec![expression.as_ref()],
            Expr::Unary { expr, .. } => vec![expr.as_ref()],
            Expr::WithSource { ast, .. } => vec![ast.as_ref()],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_pipe_expression() {
        let value = json!({
            "type": "pipe",
            "name": "translate",
            "exp": { "type": "literalPrimitive", "value": "Hello" }
        });

        let expr: Expr = serde_json::from_value(value).unwrap();
        assert_eq!(expr, Expr::pipe(Expr::string("Hello"), "translate"));
    }

    #[test]
    fn test_deserialize_camel_case_fields() {
        let value = json!({
            "type": "conditional",
            "condition": { "type": "propertyRead", "receiver": { "type": "implicitReceiver" }, "name": "on" },
            "trueExp": { "type": "literalPrimitive", "value": "A" },
            "falseExp": { "type": "literalPrimitive", "value": null }
        });

        let expr: Expr = serde_json::from_value(value).unwrap();
        assert_eq!(
            expr,
            Expr::conditional(Expr::ident("on"), Expr::string("A"), Expr::null())
        );
    }

    #[test]
    fn test_is_empty_looks_through_source_wrapper() {
        assert!(Expr::Empty.is_empty());
        assert!(Expr::with_source(Expr::Empty, "").is_empty());
        assert!(!Expr::string("").is_empty());
    }

    #[test]
    fn test_sub_expressions_keep_source_order() {
        let expr = Expr::pipe_with_args(Expr::ident("a"), "p", vec![Expr::string("arg")]);
        let children = expr.sub_expressions();
        assert_eq!(children, vec![&Expr::ident("a"), &Expr::string("arg")]);
    }

    #[test]
    fn test_as_str_only_for_strings() {
        assert_eq!(Expr::string("key").as_str(), Some("key"));
        assert_eq!(Expr::number(1.0).as_str(), None);
        assert_eq!(Expr::ident("key").as_str(), None);
    }
}
