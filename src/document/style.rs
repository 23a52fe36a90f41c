//! CSS class generation for the style-sheet serialization mode

use std::collections::HashMap;

use super::element::Element;
use super::format::css_string;

/// Distinct style property sets of a document, each mapped to a class name.
///
/// Classes are numbered in order of first appearance, so output is
/// deterministic.
#[derive(Debug, Default)]
pub struct StyleClasses {
    rules: Vec<(String, String)>,
    lookup: HashMap<String, usize>,
}

impl StyleClasses {
    /// Walk the given elements (and their descendants) and intern every
    /// non-empty style.
    pub fn collect<'a>(elements: impl IntoIterator<Item = &'a Element>, prefix: &str) -> Self {
        let mut classes = Self::default();
        for element in elements {
            classes.visit(element, prefix);
        }
        classes
    }

    fn visit(&mut self, element: &Element, prefix: &str) {
        if let Some(declarations) = declarations(element) {
            if !self.lookup.contains_key(&declarations) {
                let class = format!("{}{}", prefix, self.rules.len());
                self.lookup.insert(declarations.clone(), self.rules.len());
                self.rules.push((class, declarations));
            }
        }
        for child in element.child_elements() {
            self.visit(child, prefix);
        }
    }

    /// Class name assigned to the element's style, if it has one
    pub fn class_for(&self, element: &Element) -> Option<&str> {
        let declarations = declarations(element)?;
        self.lookup
            .get(&declarations)
            .map(|&index| self.rules[index].0.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// CSS rules in class order, e.g. `.s0 { fill: #ff0000; stroke: none; }`
    pub fn rules(&self) -> impl Iterator<Item = String> + '_ {
        self.rules
            .iter()
            .map(|(class, declarations)| format!(".{} {{ {}; }}", class, declarations))
    }
}

fn declarations(element: &Element) -> Option<String> {
    let style = element.style_properties();
    if style.is_empty() {
        return None;
    }
    Some(
        style
            .iter()
            .map(|(property, value)| match *property {
                "font-family" => format!("{}: {}", property, css_string(value)),
                _ => format!("{}: {}", property, value),
            })
            .collect::<Vec<_>>()
            .join("; "),
    )
}
