//! Template node tree consumed by the extractors.
//!
//! The tree is produced by an external template parser (see
//! `crate::core::parsers`). Element-like nodes carry static attributes, bound
//! inputs and children; control-flow blocks (`@if`, `@for`, `@switch`,
//! `@defer`) are separate variants because each one exposes its own shape of
//! child groups.

use serde::{Deserialize, Serialize};

use super::expression::Expr;

/// A node of the parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Element(Element),
    Text(Text),
    /// Text containing `{{ }}` interpolation.
    BoundText(BoundText),
    IfBlock(IfBlock),
    ForLoopBlock(ForLoopBlock),
    SwitchBlock(SwitchBlock),
    DeferredBlock(DeferredBlock),
    /// `@let name = value;`
    LetDeclaration(LetDeclaration),
    Comment(Comment),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
        })
    }

    pub fn bound_text(value: Expr) -> Self {
        Node::BoundText(BoundText { value })
    }

    pub fn let_declaration(name: impl Into<String>, value: Expr) -> Self {
        Node::LetDeclaration(LetDeclaration {
            name: name.into(),
            value,
        })
    }

    /// Returns the element if this node is element-like.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Child groups of a control-flow block, in the order they are visited.
    ///
    /// Returns `None` for non-block nodes.
    pub fn block_children(&self) -> Option<Vec<&[Node]>> {
        match self {
            Node::IfBlock(block) => Some(
                block
                    .branches
                    .iter()
                    .map(|branch| branch.children.as_slice())
                    .collect(),
            ),
            Node::ForLoopBlock(block) => {
                let mut groups = vec![block.children.as_slice()];
                if let Some(empty) = &block.empty {
                    groups.push(empty.children.as_slice());
                }
                Some(groups)
            }
            Node::SwitchBlock(block) => Some(
                block
                    .cases
                    .iter()
                    .map(|case| case.children.as_slice())
                    .collect(),
            ),
            Node::DeferredBlock(block) => {
                let mut groups = vec![block.children.as_slice()];
                groups.extend(
                    [&block.placeholder, &block.loading, &block.error]
                        .into_iter()
                        .flatten()
                        .map(|sub_block| sub_block.children.as_slice()),
                );
                Some(groups)
            }
            Node::Element(_)
            | Node::Text(_)
            | Node::BoundText(_)
            | Node::LetDeclaration(_)
            | Node::Comment(_) => None,
        }
    }
}

/// Distinguishes a plain element from an `<ng-template>` or structural
/// directive host. Both are element-like for extraction purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    #[default]
    Element,
    Template,
}

/// Static attribute: `name="value"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAttribute {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Bound attribute: `[name]="expr"`, or `name="{{ expr }}"` after the parser
/// has turned the interpolation into a binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundAttribute {
    pub name: String,
    pub value: Expr,
}

/// Event binding: `(name)="handler"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundEvent {
    pub name: String,
    pub handler: Expr,
}

/// Element-like node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(default)]
    pub kind: ElementKind,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<TextAttribute>,
    #[serde(default)]
    pub inputs: Vec<BoundAttribute>,
    #[serde(default)]
    pub outputs: Vec<BoundEvent>,
    /// Structural directive bindings (`*ngIf="..."`) of a template host.
    #[serde(default)]
    pub template_attrs: Vec<BoundAttribute>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// An `<ng-template>` or structural directive host.
    pub fn template(name: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Template,
            ..Self::new(name)
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(TextAttribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, value: Expr) -> Self {
        self.inputs.push(BoundAttribute {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, handler: Expr) -> Self {
        self.outputs.push(BoundEvent {
            name: name.into(),
            handler,
        });
        self
    }

    pub fn with_template_attr(mut self, name: impl Into<String>, value: Expr) -> Self {
        self.template_attrs.push(BoundAttribute {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Static attributes whose name is one of `names`, in attribute order.
    pub fn attributes_named<'a>(
        &'a self,
        names: &'a [String],
    ) -> impl Iterator<Item = &'a TextAttribute> + 'a {
        self.attributes
            .iter()
            .filter(move |attribute| names.contains(&attribute.name))
    }

    /// Bound inputs whose name is one of `names`, in attribute order.
    pub fn inputs_named<'a>(
        &'a self,
        names: &'a [String],
    ) -> impl Iterator<Item = &'a BoundAttribute> + 'a {
        self.inputs
            .iter()
            .filter(move |input| names.contains(&input.name))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundText {
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetDeclaration {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub value: String,
}

/// `@if (cond) { } @else if (cond) { } @else { }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IfBlock {
    pub branches: Vec<IfBlockBranch>,
}

/// One branch of an `@if` block. The final `@else` has no expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfBlockBranch {
    #[serde(default)]
    pub expression: Option<Expr>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl IfBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branch(mut self, expression: Option<Expr>, children: Vec<Node>) -> Self {
        self.branches.push(IfBlockBranch {
            expression,
            children,
        });
        self
    }
}

impl From<IfBlock> for Node {
    fn from(block: IfBlock) -> Self {
        Node::IfBlock(block)
    }
}

/// `@for (item of items; track item.id) { } @empty { }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForLoopBlock {
    pub expression: Expr,
    #[serde(default = "empty_expr")]
    pub track_by: Expr,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub empty: Option<BlockBody>,
}

impl ForLoopBlock {
    pub fn new(expression: Expr, children: Vec<Node>) -> Self {
        Self {
            expression,
            track_by: Expr::Empty,
            children,
            empty: None,
        }
    }

    pub fn with_empty(mut self, children: Vec<Node>) -> Self {
        self.empty = Some(BlockBody { children });
        self
    }
}

impl From<ForLoopBlock> for Node {
    fn from(block: ForLoopBlock) -> Self {
        Node::ForLoopBlock(block)
    }
}

/// `@switch (expr) { @case (a) { } @default { } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchBlock {
    pub expression: Expr,
    #[serde(default)]
    pub cases: Vec<SwitchBlockCase>,
}

/// One `@case`; `@default` has no expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchBlockCase {
    #[serde(default)]
    pub expression: Option<Expr>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl SwitchBlock {
    pub fn new(expression: Expr) -> Self {
        Self {
            expression,
            cases: Vec::new(),
        }
    }

    pub fn with_case(mut self, expression: Option<Expr>, children: Vec<Node>) -> Self {
        self.cases.push(SwitchBlockCase {
            expression,
            children,
        });
        self
    }
}

impl From<SwitchBlock> for Node {
    fn from(block: SwitchBlock) -> Self {
        Node::SwitchBlock(block)
    }
}

/// `@defer { } @placeholder { } @loading { } @error { }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeferredBlock {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub placeholder: Option<BlockBody>,
    #[serde(default)]
    pub loading: Option<BlockBody>,
    #[serde(default)]
    pub error: Option<BlockBody>,
}

impl DeferredBlock {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    pub fn with_placeholder(mut self, children: Vec<Node>) -> Self {
        self.placeholder = Some(BlockBody { children });
        self
    }

    pub fn with_loading(mut self, children: Vec<Node>) -> Self {
        self.loading = Some(BlockBody { children });
        self
    }

    pub fn with_error(mut self, children: Vec<Node>) -> Self {
        self.error = Some(BlockBody { children });
        self
    }
}

impl From<DeferredBlock> for Node {
    fn from(block: DeferredBlock) -> Self {
        Node::DeferredBlock(block)
    }
}

/// Children of a secondary block (`@empty`, `@placeholder`, `@loading`, `@error`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockBody {
    #[serde(default)]
    pub children: Vec<Node>,
}

fn empty_expr() -> Expr {
    Expr::Empty
}
