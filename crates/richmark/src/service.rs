//! MarkdownConverter - the main entry point for markup to Markdown conversion.

use tracing::{debug, trace};

use crate::node::{Node, NodeRef};
use crate::rules::{Action, Filter, Rule, Rules};
use crate::utilities::escape_markdown;

/// Options for MarkdownConverter.
///
/// The defaults reproduce the editor's Markdown export exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Ordered list marker; every item uses it literally
    pub ordered_list_marker: String,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Fence string for code blocks
    pub fence: String,

    /// Escape Markdown metacharacters in text leaves. Off by default: text is
    /// emitted verbatim, so a literal `*` or `#` in the source stays live
    /// Markdown syntax in the output.
    pub escape_text: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            bullet_list_marker: '-',
            ordered_list_marker: "1.".to_string(),
            em_delimiter: '*',
            strong_delimiter: "**".to_string(),
            fence: "```".to_string(),
            escape_text: false,
        }
    }
}

/// The main service for converting markup trees to Markdown
pub struct MarkdownConverter {
    options: MarkdownOptions,
    rules: Rules,
}

impl MarkdownConverter {
    /// Create a new MarkdownConverter with default options
    pub fn new() -> Self {
        Self {
            options: MarkdownOptions::default(),
            rules: Rules::new(),
        }
    }

    /// Create a MarkdownConverter with custom options
    pub fn with_options(options: MarkdownOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert a markup tree to Markdown.
    ///
    /// A fragment root is a container: its children are converted in order
    /// and the fragment itself contributes nothing. Any other root converts
    /// like a top-level node with no parent. The result is trimmed.
    pub fn convert(&self, root: &Node) -> String {
        let root_ref = NodeRef::new(root);
        let output = if root.is_fragment() {
            self.process_children(&root_ref)
        } else {
            self.process_node(&root_ref)
        };

        let markdown = post_process(&output);
        debug!(
            root = root.tag_name(),
            bytes = markdown.len(),
            "converted markup tree to markdown"
        );
        markdown
    }

    /// Convert a single node given the tag of its parent.
    ///
    /// Unlike [`MarkdownConverter::convert`], a fragment is not special and
    /// the result is not trimmed.
    pub fn convert_node<'a>(&self, node: &'a Node, parent_tag: Option<&'a str>) -> String {
        let node_ref = match parent_tag {
            Some(tag) => NodeRef::with_parent(node, tag),
            None => NodeRef::new(node),
        };
        self.process_node(&node_ref)
    }

    /// Parse an HTML fragment and convert it to Markdown
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> String {
        self.convert(&crate::html::parse_html(html))
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Keep elements matching the filter as HTML
    pub fn keep(&mut self, filter: Filter) -> &mut Self {
        self.rules.keep(filter);
        self
    }

    /// Remove elements matching the filter
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Escape markdown special characters in a string
    pub fn escape(&self, text: &str) -> String {
        escape_markdown(text)
    }

    /// Get the current options
    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut MarkdownOptions {
        &mut self.options
    }

    /// Process children of a node
    fn process_children(&self, node: &NodeRef) -> String {
        let mut result = String::new();

        for child in node.children() {
            result.push_str(&self.process_node(&child));
        }

        result
    }

    /// Process a single node
    fn process_node(&self, node: &NodeRef) -> String {
        match node.node {
            Node::Text(text) if self.options.escape_text => self.escape(text),
            Node::Text(text) => text.clone(),
            Node::Element(_) => self.process_element(node),
        }
    }

    fn process_element(&self, node: &NodeRef) -> String {
        match self.rules.resolve(node) {
            Action::Remove => String::new(),
            Action::Keep => node.outer_html(),
            Action::Render(rule) => {
                // Children first: every rule sees finished inner content
                let content = self.process_children(node);
                rule.render(node, &content, &self.options)
            }
            Action::PassThrough => {
                trace!(tag = node.tag_name(), "no rule matched, passing content through");
                self.process_children(node)
            }
        }
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim the final output. U+FEFF counts as whitespace here: editors leave it
/// behind as a caret placeholder.
fn post_process(output: &str) -> String {
    output
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(children: Vec<Node>) -> Node {
        children
            .into_iter()
            .fold(Node::fragment(), |root, child| root.with_child(child))
    }

    fn el(tag: &str, children: Vec<Node>) -> Node {
        children
            .into_iter()
            .fold(Node::element(tag), |node, child| node.with_child(child))
    }

    fn text(content: &str) -> Node {
        Node::text(content)
    }

    #[test]
    fn test_heading() {
        let converter = MarkdownConverter::new();
        let h1 = el("h1", vec![text("Title")]);
        assert_eq!(converter.convert_node(&h1, None), "# Title\n\n");
        assert_eq!(converter.convert(&doc(vec![h1])), "# Title");
    }

    #[test]
    fn test_nested_emphasis() {
        let converter = MarkdownConverter::new();
        let strong = el("strong", vec![el("em", vec![text("hi")])]);
        assert_eq!(converter.convert(&doc(vec![strong])), "***hi***");
    }

    #[test]
    fn test_code_block() {
        let converter = MarkdownConverter::new();
        let pre = el("pre", vec![el("code", vec![text("x=1")])]);
        assert_eq!(converter.convert_node(&pre, None), "```\nx=1\n```\n\n");
        assert_eq!(converter.convert(&doc(vec![pre])), "```\nx=1\n```");
    }

    #[test]
    fn test_inline_code() {
        let converter = MarkdownConverter::new();
        let p = el("p", vec![text("run "), el("code", vec![text("ls")])]);
        assert_eq!(converter.convert(&doc(vec![p])), "run `ls`");
    }

    #[test]
    fn test_ordered_list_numbering_is_literal() {
        let converter = MarkdownConverter::new();
        let ol = el(
            "ol",
            vec![el("li", vec![text("a")]), el("li", vec![text("b")])],
        );
        assert_eq!(converter.convert_node(&ol, None), "1. a\n1. b\n");
        assert_eq!(converter.convert(&doc(vec![ol])), "1. a\n1. b");
    }

    #[test]
    fn test_unordered_list() {
        let converter = MarkdownConverter::new();
        let ul = el(
            "ul",
            vec![el("li", vec![text("One")]), el("li", vec![text("Two")])],
        );
        assert_eq!(converter.convert(&doc(vec![ul])), "- One\n- Two");
    }

    #[test]
    fn test_link() {
        let converter = MarkdownConverter::new();
        let a = Node::element_with_attrs("a", vec![("href", "example.com")]).with_child(text("click"));
        assert_eq!(converter.convert(&doc(vec![a])), "[click](example.com)");
    }

    #[test]
    fn test_link_without_href_is_not_rejected() {
        let converter = MarkdownConverter::new();
        let a = el("a", vec![text("click")]);
        assert_eq!(converter.convert(&doc(vec![a])), "[click]()");
    }

    #[test]
    fn test_unrecognized_tags_pass_through() {
        let converter = MarkdownConverter::new();
        let tree = doc(vec![
            el("section", vec![text("a "), el("article", vec![text("b")])]),
            el("custom-tag", vec![text(" c")]),
        ]);
        assert_eq!(converter.convert(&tree), "a b c");
    }

    #[test]
    fn test_span_with_font_size_is_dropped() {
        let converter = MarkdownConverter::new();
        let span = Node::element_with_attrs("span", vec![("style", "font-size: 18px;")])
            .with_child(text("big"));
        assert_eq!(converter.convert(&doc(vec![span])), "big");
    }

    #[test]
    fn test_underline_emits_raw_markup() {
        let converter = MarkdownConverter::new();
        let u = el("u", vec![text("under")]);
        assert_eq!(converter.convert(&doc(vec![u])), "<u>under</u>");
    }

    #[test]
    fn test_line_break() {
        let converter = MarkdownConverter::new();
        let p = el("p", vec![text("a"), Node::element("br"), text("b")]);
        assert_eq!(converter.convert(&doc(vec![p])), "a\nb");
    }

    #[test]
    fn test_output_is_trimmed() {
        let converter = MarkdownConverter::new();
        let tree = doc(vec![
            text("  \n"),
            el("p", vec![text("body")]),
            Node::element("br"),
            text("\t "),
        ]);
        assert_eq!(converter.convert(&tree), "body");
    }

    #[test]
    fn test_text_is_not_escaped_by_default() {
        let converter = MarkdownConverter::new();
        let tree = doc(vec![text("*not* #emphasis_")]);
        assert_eq!(converter.convert(&tree), "*not* #emphasis_");
    }

    #[test]
    fn test_escape_text_option() {
        let options = MarkdownOptions {
            escape_text: true,
            ..Default::default()
        };
        let converter = MarkdownConverter::with_options(options);
        let tree = doc(vec![el("strong", vec![text("a*b")])]);
        assert_eq!(converter.convert(&tree), "**a\\*b**");
    }

    #[test]
    fn test_custom_markers() {
        let options = MarkdownOptions {
            bullet_list_marker: '*',
            em_delimiter: '_',
            ..Default::default()
        };
        let converter = MarkdownConverter::with_options(options);
        let ul = el("ul", vec![el("li", vec![el("em", vec![text("x")])])]);
        assert_eq!(converter.convert(&doc(vec![ul])), "* _x_");
    }

    #[test]
    fn test_text_root() {
        let converter = MarkdownConverter::new();
        assert_eq!(converter.convert(&text("  plain ")), "plain");
    }

    #[test]
    fn test_fragment_root_contributes_nothing() {
        let converter = MarkdownConverter::new();
        let root = doc(vec![text("just text")]);
        assert_eq!(converter.convert(&root), "just text");
    }

    #[test]
    fn test_element_root_applies_its_own_rule() {
        let converter = MarkdownConverter::new();

        let h1 = el("h1", vec![text("Title")]);
        assert_eq!(converter.convert(&h1), "# Title");

        let strong = el("strong", vec![el("em", vec![text("hi")])]);
        assert_eq!(converter.convert(&strong), "***hi***");

        let a = Node::element_with_attrs("a", vec![("href", "example.com")]).with_child(text("click"));
        assert_eq!(converter.convert(&a), "[click](example.com)");

        let pre = el("pre", vec![el("code", vec![text("x=1")])]);
        assert_eq!(converter.convert(&pre), "```\nx=1\n```");

        let ol = el("ol", vec![el("li", vec![text("a")]), el("li", vec![text("b")])]);
        assert_eq!(converter.convert(&ol), "1. a\n1. b");
    }

    #[test]
    fn test_element_root_has_no_parent() {
        let converter = MarkdownConverter::new();
        assert_eq!(converter.convert(&el("code", vec![text("ls")])), "`ls`");
        assert_eq!(converter.convert(&el("li", vec![text("x")])), "- x");
    }

    #[test]
    fn test_uppercase_parent_tag_keeps_list_context() {
        let converter = MarkdownConverter::new();
        let ol = Node::Element(crate::node::Element {
            tag: "OL".to_string(),
            children: vec![el("li", vec![text("a")])],
            ..Default::default()
        });
        assert_eq!(converter.convert(&ol), "1. a");
    }

    #[test]
    fn test_trim_strips_byte_order_mark() {
        let converter = MarkdownConverter::new();
        let tree = doc(vec![
            text("\u{feff}"),
            el("p", vec![text("a\u{a0}")]),
            text("\u{feff}"),
        ]);
        assert_eq!(converter.convert(&tree), "a");
        assert_eq!(converter.convert(&text("\u{feff} x \u{feff}")), "x");
    }

    #[test]
    fn test_top_level_list_item_gets_bullet() {
        let converter = MarkdownConverter::new();
        let tree = doc(vec![el("li", vec![text("orphan")])]);
        assert_eq!(converter.convert(&tree), "- orphan");
    }

    #[test]
    fn test_deterministic() {
        let converter = MarkdownConverter::new();
        let tree = doc(vec![
            el("h2", vec![text("Notes")]),
            el("p", vec![el("b", vec![text("bold")]), text(" and "), el("i", vec![text("it")])]),
        ]);
        assert_eq!(converter.convert(&tree), converter.convert(&tree));
        assert_eq!(converter.convert(&tree), "## Notes\n\n**bold** and *it*");
    }

    #[test]
    fn test_add_rule_overrides_builtin() {
        let mut converter = MarkdownConverter::new();
        converter.add_rule(
            "underline",
            Rule::for_tags(&["u"], |cx| cx.wrap("_")),
        );
        let tree = doc(vec![el("u", vec![text("x")])]);
        assert_eq!(converter.convert(&tree), "_x_");
    }

    #[test]
    fn test_keep_and_remove() {
        let mut converter = MarkdownConverter::new();
        converter
            .keep(Filter::tag("table"))
            .remove(Filter::tag("script"));

        let table = el("table", vec![el("tr", vec![el("td", vec![text("1")])])]);
        let script = el("script", vec![text("alert(1)")]);
        let tree = doc(vec![script, table]);
        assert_eq!(converter.convert(&tree), "<table><tr><td>1</td></tr></table>");
    }

    #[test]
    fn test_use_plugin() {
        let mut converter = MarkdownConverter::new();
        converter.use_plugin(|c| {
            c.options_mut().strong_delimiter = "__".to_string();
        });
        assert_eq!(converter.options().strong_delimiter, "__");
        let tree = doc(vec![el("b", vec![text("x")])]);
        assert_eq!(converter.convert(&tree), "__x__");
    }

    #[test]
    fn test_converter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkdownConverter>();
    }
}
