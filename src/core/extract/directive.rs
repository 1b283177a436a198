//! Marker attribute extraction (`<p translate>KEY</p>`, `<p translate="KEY">`,
//! `<p [translate]="expr">`).

use crate::core::ast::{Element, Node};
use crate::core::collection::TranslationCollection;
use crate::core::extract::flatten::Flatten;
use crate::core::extract::walker::elements_with_markers;
use crate::utils::collapse_whitespace;

/// Marker attribute used when none is configured.
pub const DEFAULT_MARKER: &str = "translate";

#[derive(Debug, Clone)]
pub struct DirectiveExtractor {
    marker_names: Vec<String>,
}

impl DirectiveExtractor {
    /// An empty `marker_names` list falls back to [`DEFAULT_MARKER`].
    pub fn new(marker_names: Vec<String>) -> Self {
        let marker_names = if marker_names.is_empty() {
            vec![DEFAULT_MARKER.to_string()]
        } else {
            marker_names
        };
        Self { marker_names }
    }

    pub fn marker_names(&self) -> &[String] {
        &self.marker_names
    }

    /// Adds the keys of every marked element under `nodes` to `collection`.
    pub fn extract(&self, nodes: &[Node], collection: TranslationCollection) -> TranslationCollection {
        elements_with_markers(nodes, &self.marker_names)
            .into_iter()
            .fold(collection, |collection, element| {
                collection.add_keys(self.extract_from_element(element))
            })
    }

    /// Keys contributed by a single marked element.
    ///
    /// Static marker values win over bound markers, which win over the
    /// element's text content.
    pub fn extract_from_element(&self, element: &Element) -> Vec<String> {
        let static_values: Vec<String> = element
            .attributes_named(&self.marker_names)
            .filter(|attribute| !attribute.value.is_empty())
            .map(|attribute| attribute.value.clone())
            .collect();
        if !static_values.is_empty() {
            return static_values;
        }

        let bound: Vec<_> = element
            .inputs_named(&self.marker_names)
            .filter(|input| !input.value.is_empty())
            .collect();
        if !bound.is_empty() {
            return bound
                .into_iter()
                .flat_map(|input| Flatten::all().literals(&input.value))
                .map(str::to_string)
                .collect();
        }

        text_runs(&element.children)
    }
}

impl Default for DirectiveExtractor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Each run of consecutive direct text children, joined and whitespace
/// collapsed. Any other node ends the current run.
fn text_runs(children: &[Node]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();

    for child in children {
        match child {
            Node::Text(text) => current.push_str(&text.value),
            _ => push_run(&mut runs, &mut current),
        }
    }
    push_run(&mut runs, &mut current);

    runs
}

fn push_run(runs: &mut Vec<String>, current: &mut String) {
    let text = collapse_whitespace(current);
    if !text.is_empty() {
        runs.push(text);
    }
    current.clear();
}
