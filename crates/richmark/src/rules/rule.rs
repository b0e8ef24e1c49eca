//! Rule and Filter types for markup conversion.
//!
//! A [`Rule`] pairs a [`Filter`] with a template. The template only ever sees
//! a [`RuleContext`]: the matched element, the Markdown already produced for
//! its children, and the active options.

use crate::node::NodeRef;
use crate::service::MarkdownOptions;

type Template = Box<dyn Fn(&RuleContext) -> String + Send + Sync>;
type Predicate = Box<dyn Fn(&NodeRef) -> bool + Send + Sync>;

/// Selects the elements a rule (or a keep/remove entry) applies to.
pub enum Filter {
    /// Any of these tags, compared ASCII case-insensitively
    Tags(Vec<String>),
    /// An arbitrary test over the element and its parent context
    Matching(Predicate),
}

impl Filter {
    pub fn tag(name: &str) -> Self {
        Self::tags(&[name])
    }

    pub fn tags(names: &[&str]) -> Self {
        Filter::Tags(names.iter().map(|name| name.to_ascii_lowercase()).collect())
    }

    pub fn matching<F>(predicate: F) -> Self
    where
        F: Fn(&NodeRef) -> bool + Send + Sync + 'static,
    {
        Filter::Matching(Box::new(predicate))
    }

    /// Text leaves never match.
    pub fn matches(&self, node: &NodeRef) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            Filter::Tags(tags) => tags
                .iter()
                .any(|tag| node.tag_name().eq_ignore_ascii_case(tag)),
            Filter::Matching(predicate) => predicate(node),
        }
    }
}

/// Everything a rule template can look at.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub node: NodeRef<'a>,
    /// Markdown already produced for the element's children
    pub content: &'a str,
    pub options: &'a MarkdownOptions,
}

impl<'a> RuleContext<'a> {
    pub fn tag(&self) -> &'a str {
        self.node.tag_name()
    }

    pub fn parent_is(&self, tag: &str) -> bool {
        self.node.parent_is(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }

    /// `delimiter` + content + `delimiter`
    pub fn wrap(&self, delimiter: impl std::fmt::Display) -> String {
        format!("{delimiter}{}{delimiter}", self.content)
    }

    /// Content followed by a blank line
    pub fn block(&self) -> String {
        format!("{}\n\n", self.content)
    }
}

/// A filter plus the template that renders matching elements.
pub struct Rule {
    filter: Filter,
    template: Template,
}

impl Rule {
    pub fn new<F>(filter: Filter, template: F) -> Self
    where
        F: Fn(&RuleContext) -> String + Send + Sync + 'static,
    {
        Self {
            filter,
            template: Box::new(template),
        }
    }

    /// Shorthand for a rule keyed on tag names.
    pub fn for_tags<F>(tags: &[&str], template: F) -> Self
    where
        F: Fn(&RuleContext) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), template)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn matches(&self, node: &NodeRef) -> bool {
        self.filter.matches(node)
    }

    pub fn render(&self, node: &NodeRef, content: &str, options: &MarkdownOptions) -> String {
        (self.template)(&RuleContext {
            node: *node,
            content,
            options,
        })
    }
}
