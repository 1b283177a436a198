//! Inline template lookup for Angular component sources.
//!
//! `@Component({ template: '...' })` is located with swc; the template is the
//! value of the `template` property when it is a string literal or a template
//! literal without substitutions.

use std::path::Path;
use std::sync::Arc;

use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::{Callee, Decorator, Expr, Lit, Prop, PropName, PropOrSpread};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::parsers::ParseError;

const COMPONENT_SUFFIX: &str = ".component.ts";
const COMPONENT_DECORATOR: &str = "Component";
const TEMPLATE_PROPERTY: &str = "template";

pub fn is_component_path(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|path| path.ends_with(COMPONENT_SUFFIX))
}

/// Returns the inline template of the first `@Component` decorator in
/// `source`, or `None` when the component has no inline template.
///
/// Fails with [`ParseError::Component`] when the TypeScript source cannot be
/// parsed.
pub fn inline_template(source: &str, file_path: &Path) -> Result<Option<String>, ParseError> {
    let source_map: Arc<SourceMap> = Default::default();

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(file_path.to_path_buf()).into(),
            source.to_string(),
        );

        let syntax = Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        });
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
        let module = parser
            .parse_module()
            .map_err(|e| ParseError::Component {
                path: file_path.display().to_string(),
                message: format!("{:?}", e),
            })?;

        let mut finder = TemplateFinder::default();
        module.visit_with(&mut finder);
        Ok(finder.template)
    })
}

#[derive(Default)]
struct TemplateFinder {
    template: Option<String>,
    found_component: bool,
}

impl Visit for TemplateFinder {
    fn visit_decorator(&mut self, node: &Decorator) {
        if self.found_component {
            return;
        }
        let Expr::Call(call) = &*node.expr else {
            return;
        };
        let Callee::Expr(callee) = &call.callee else {
            return;
        };
        if !matches!(&**callee, Expr::Ident(ident) if ident.sym == COMPONENT_DECORATOR) {
            return;
        }

        self.found_component = true;
        if let Some(arg) = call.args.first()
            && let Expr::Object(object) = &*arg.expr
        {
            self.template = object.props.iter().find_map(|prop| match prop {
                PropOrSpread::Prop(prop) => match &**prop {
                    Prop::KeyValue(kv) if is_template_key(&kv.key) => static_string(&kv.value),
                    _ => None,
                },
                PropOrSpread::Spread(_) => None,
            });
        }
    }
}

fn is_template_key(key: &PropName) -> bool {
    match key {
        PropName::Ident(ident) => ident.sym == TEMPLATE_PROPERTY,
        PropName::Str(s) => s.value.as_str() == Some(TEMPLATE_PROPERTY),
        _ => false,
    }
}

fn static_string(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|quasi| quasi.cooked.as_ref())
            .and_then(|cooked| cooked.as_str())
            .map(|s| s.to_string()),
        Expr::Paren(paren) => static_string(&paren.expr),
        _ => None,
    }
}
