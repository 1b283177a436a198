//! Expression literal flattening.
//!
//! Resolves an expression to the ordered list of string literals it can
//! statically yield, following every branch of ternaries and logical
//! fallbacks. The traversal is driven by an explicit stack so expressions
//! nested hundreds of levels deep never grow the call stack.

use crate::core::ast::{Expr, Primitive};

/// Binary operators whose result is one of the operands.
const FALLBACK_OPERATORS: &[&str] = &["||", "&&", "??"];

/// Flattening strategy.
///
/// `all()` follows every binary operand, so a marker binding like
/// `translate="{{ 'KEY1' + key2 + 'KEY3' }}"` contributes `KEY1` and `KEY3`.
/// `value_only()` treats arithmetic and concatenation as computed values that
/// yield nothing; it is used for pipe operands, where
/// `'SOURCES.' + source.name | translate` must not produce a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flatten {
    follow_computed_binaries: bool,
}

impl Flatten {
    pub const fn all() -> Self {
        Self {
            follow_computed_binaries: true,
        }
    }

    pub const fn value_only() -> Self {
        Self {
            follow_computed_binaries: false,
        }
    }

    /// String literals reachable from `root`, left to right.
    pub fn literals<'a>(&self, root: &'a Expr) -> Vec<&'a str> {
        let mut literals = Vec::new();
        let mut stack = vec![root];

        while let Some(expr) = stack.pop() {
            match expr {
                Expr::LiteralPrimitive {
                    value: Primitive::String(value),
                } => literals.push(value.as_str()),
                Expr::Interpolation { expressions, .. } | Expr::LiteralArray { expressions } => {
                    stack.extend(expressions.iter().rev());
                }
                Expr::LiteralMap { values, .. } => stack.extend(values.iter().rev()),
                Expr::Pipe { exp, .. } => stack.push(exp),
                Expr::Conditional {
                    true_exp,
                    false_exp,
                    ..
                } => {
                    stack.push(false_exp);
                    stack.push(true_exp);
                }
                Expr::Binary {
                    operation,
                    left,
                    right,
                } => {
                    if self.follow_computed_binaries || is_fallback(operation) {
                        stack.push(right);
                        stack.push(left);
                    }
                }
                Expr::WithSource { ast, .. } => stack.push(ast),
                Expr::Parenthesized { expression } | Expr::NonNullAssert { expression } => {
                    stack.push(expression)
                }
                Expr::LiteralPrimitive { .. }
                | Expr::Empty
                | Expr::ImplicitReceiver
                | Expr::ThisReceiver
                | Expr::Call { .. }
                | Expr::SafeCall { .. }
                | Expr::PropertyRead { .. }
                | Expr::SafePropertyRead { .. }
                | Expr::KeyedRead { .. }
                | Expr::PrefixNot { .. }
                | Expr::Unary { .. }
                | Expr::Chain { .. } => {}
            }
        }

        literals
    }
}

impl Default for Flatten {
    fn default() -> Self {
        Self::all()
    }
}

fn is_fallback(operation: &str) -> bool {
    FALLBACK_OPERATORS.contains(&operation)
}

/// Full flattening of `expr` (see [`Flatten::all`]).
pub fn flatten(expr: &Expr) -> Vec<&str> {
    Flatten::all().literals(expr)
}
