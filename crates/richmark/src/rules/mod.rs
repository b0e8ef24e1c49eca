//! Rule system for markup to Markdown conversion.

mod editor;
mod rule;

pub use editor::editor_rules;
pub use rule::{Filter, Rule, RuleContext};

use indexmap::IndexMap;

use crate::node::NodeRef;

/// What the converter does with one element.
pub enum Action<'r> {
    /// Drop the element and everything below it
    Remove,
    /// Re-emit the element as HTML
    Keep,
    /// Render the converted children through this rule
    Render(&'r Rule),
    /// Emit the converted children unchanged
    PassThrough,
}

/// Collection of rules for conversion
pub struct Rules {
    /// Checked before the built-ins; re-adding a key replaces the rule
    custom_rules: IndexMap<String, Rule>,
    keep_filters: Vec<Filter>,
    remove_filters: Vec<Filter>,
    editor_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in editor rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            keep_filters: Vec::new(),
            remove_filters: Vec::new(),
            editor_rules: editor_rules(),
        }
    }

    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    pub fn keep(&mut self, filter: Filter) {
        self.keep_filters.push(filter);
    }

    pub fn remove(&mut self, filter: Filter) {
        self.remove_filters.push(filter);
    }

    /// First custom or built-in rule matching the element
    pub fn for_node(&self, node: &NodeRef) -> Option<&Rule> {
        self.custom_rules
            .values()
            .chain(&self.editor_rules)
            .find(|rule| rule.matches(node))
    }

    /// Decide how an element is converted.
    ///
    /// A matching rule beats keep, and keep beats remove.
    pub fn resolve(&self, node: &NodeRef) -> Action<'_> {
        if let Some(rule) = self.for_node(node) {
            return Action::Render(rule);
        }
        if self.keep_filters.iter().any(|filter| filter.matches(node)) {
            return Action::Keep;
        }
        if self.remove_filters.iter().any(|filter| filter.matches(node)) {
            return Action::Remove;
        }
        Action::PassThrough
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
