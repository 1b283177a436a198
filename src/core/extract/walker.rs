//! Template tree traversals.
//!
//! Both walks keep their pending work on an explicit stack, so templates with
//! hundreds of nested elements or control-flow blocks are handled without
//! recursion.

use crate::core::ast::{Element, Expr, Node};

/// True if the element carries a static or bound attribute named in `markers`.
pub fn has_marker(element: &Element, markers: &[String]) -> bool {
    element.attributes_named(markers).next().is_some()
        || element.inputs_named(markers).next().is_some()
}

enum MarkerWork<'a> {
    /// A sibling list: its elements are handled before its blocks.
    Siblings(Vec<&'a Node>),
    /// An element followed by its own qualifying descendants.
    Element(&'a Element),
}

/// Element-like nodes carrying one of the `markers` attributes.
///
/// Within a sibling list, every element subtree is reported before the
/// contents of the list's control-flow blocks. The branches of one block are
/// concatenated and treated as a single sibling list.
pub fn elements_with_markers<'a>(nodes: &'a [Node], markers: &[String]) -> Vec<&'a Element> {
    let mut found = Vec::new();
    let mut stack = vec![MarkerWork::Siblings(nodes.iter().collect())];

    while let Some(work) = stack.pop() {
        match work {
            MarkerWork::Element(element) => {
                if has_marker(element, markers) {
                    found.push(element);
                }
                stack.push(MarkerWork::Siblings(element.children.iter().collect()));
            }
            MarkerWork::Siblings(siblings) => {
                let blocks: Vec<Vec<&Node>> = siblings
                    .iter()
                    .filter_map(|node| node.block_children())
                    .map(|groups| groups.into_iter().flatten().collect())
                    .collect();
                stack.extend(blocks.into_iter().rev().map(MarkerWork::Siblings));
                stack.extend(
                    siblings
                        .iter()
                        .rev()
                        .filter_map(|node| node.as_element())
                        .map(MarkerWork::Element),
                );
            }
        }
    }

    found
}

enum Step<'a> {
    Node(&'a Node),
    Expr(&'a Expr),
}

/// Every root expression of the document, in document order.
///
/// Covers element inputs, outputs and structural directive bindings,
/// interpolated text, `@let` values and control-flow block expressions.
pub fn expressions(nodes: &[Node]) -> Vec<&Expr> {
    let mut found = Vec::new();
    let mut stack: Vec<Step> = nodes.iter().rev().map(Step::Node).collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Expr(expr) => found.push(expr),
            Step::Node(node) => stack.extend(node_steps(node).into_iter().rev()),
        }
    }

    found
}

/// Expressions and children of a single node, in document order.
fn node_steps(node: &Node) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    match node {
        Node::Element(element) => {
            steps.extend(element.inputs.iter().map(|input| Step::Expr(&input.value)));
            steps.extend(element.outputs.iter().map(|output| Step::Expr(&output.handler)));
            steps.extend(element.template_attrs.iter().map(|attr| Step::Expr(&attr.value)));
            steps.extend(element.children.iter().map(Step::Node));
        }
        Node::BoundText(text) => steps.push(Step::Expr(&text.value)),
        Node::LetDeclaration(declaration) => steps.push(Step::Expr(&declaration.value)),
        Node::IfBlock(block) => {
            for branch in &block.branches {
                steps.extend(branch.expression.iter().map(Step::Expr));
                steps.extend(branch.children.iter().map(Step::Node));
            }
        }
        Node::ForLoopBlock(block) => {
            steps.push(Step::Expr(&block.expression));
            steps.push(Step::Expr(&block.track_by));
            steps.extend(block.children.iter().map(Step::Node));
            if let Some(empty) = &block.empty {
                steps.extend(empty.children.iter().map(Step::Node));
            }
        }
        Node::SwitchBlock(block) => {
            steps.push(Step::Expr(&block.expression));
            for case in &block.cases {
                steps.extend(case.expression.iter().map(Step::Expr));
                steps.extend(case.children.iter().map(Step::Node));
            }
        }
        Node::DeferredBlock(_) => {
            if let Some(groups) = node.block_children() {
                steps.extend(groups.into_iter().flatten().map(Step::Node));
            }
        }
        Node::Text(_) | Node::Comment(_) => {}
    }
    steps
}
