//! HTML parsing support.
//!
//! This module parses serialized editor markup (e.g. the `innerHTML` of a
//! content-editable surface) into the [`Node`] tree used by the converter.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a document root.
///
/// The returned node is a fragment whose children are the top-level nodes of
/// the markup. Comments and doctypes are dropped; malformed markup is
/// recovered the way browsers recover it.
///
/// # Example
///
/// ```rust
/// use richmark::{parse_html, MarkdownConverter};
///
/// let root = parse_html("<h1>Hello <em>World</em></h1>");
///
/// let converter = MarkdownConverter::new();
/// assert_eq!(converter.convert(&root), "# Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    let mut root = Node::fragment();
    append_children(&mut root, document.root_element());
    root
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let value = element.value();
    let attrs: Vec<(&str, &str)> = value.attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(value.name())
    } else {
        Node::element_with_attrs(value.name(), attrs)
    };

    append_children(&mut node, element);
    node
}

fn append_children(node: &mut Node, element: ElementRef) {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }
}
