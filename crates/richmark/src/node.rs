//! Markup tree for Markdown conversion.
//!
//! A document is a tree of [`Node`]s: text leaves and tagged elements. The
//! root of a document is a fragment element that holds the top-level nodes
//! and never contributes syntax of its own. Any HTML parser (or an editor
//! surface) can build this structure and hand it to the converter.

use indexmap::IndexMap;

use crate::utilities::is_void;

/// Tag reserved for the document root container.
pub const FRAGMENT_TAG: &str = "#document-fragment";

/// Name reported by [`Node::tag_name`] for text leaves.
pub const TEXT_TAG: &str = "#text";

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text leaf
    Text(String),
    /// Tagged element with attributes and children
    Element(Element),
}

/// An element node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name, e.g. `"strong"`
    pub tag: String,

    /// Attributes in source order, keyed by lowercase name
    pub attributes: IndexMap<String, String>,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Node::Element(Element {
            tag: tag_name.to_lowercase(),
            ..Element::default()
        })
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let attributes = attrs
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v.to_string()))
            .collect();

        Node::Element(Element {
            tag: tag_name.to_lowercase(),
            attributes,
            children: Vec::new(),
        })
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Create an empty document root
    pub fn fragment() -> Self {
        Node::Element(Element {
            tag: FRAGMENT_TAG.to_string(),
            ..Element::default()
        })
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Check if this is a document root
    pub fn is_fragment(&self) -> bool {
        self.tag_name() == FRAGMENT_TAG
    }

    /// Get the tag name (lowercase), or `#text` for text leaves
    pub fn tag_name(&self) -> &str {
        match self {
            Node::Text(_) => TEXT_TAG,
            Node::Element(el) => &el.tag,
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Text(_) => None,
            Node::Element(el) => el
                .attributes
                .get(name.to_lowercase().as_str())
                .map(String::as_str),
        }
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute. Text nodes carry no attributes and ignore the call.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Node::Element(el) = self {
            el.attributes
                .insert(name.to_lowercase(), value.to_string());
        }
    }

    /// Get all child nodes
    pub fn children(&self) -> std::slice::Iter<'_, Node> {
        match self {
            Node::Text(_) => Default::default(),
            Node::Element(el) => el.children.iter(),
        }
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node. Text nodes are leaves and ignore the call.
    pub fn add_child(&mut self, child: Node) {
        if let Node::Element(el) = self {
            el.children.push(child);
        }
    }

    /// Builder form of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Reconstruct outer HTML
    pub fn outer_html(&self) -> String {
        match self {
            Node::Text(text) => escape_html_text(text),
            Node::Element(el) if el.tag == FRAGMENT_TAG => self.inner_html(),
            Node::Element(el) => {
                let tag = &el.tag;
                let attrs = attributes_string(&el.attributes);
                let open = if attrs.is_empty() {
                    format!("<{}>", tag)
                } else {
                    format!("<{} {}>", tag, attrs)
                };

                if is_void(tag) {
                    open
                } else {
                    format!("{}{}</{}>", open, self.inner_html(), tag)
                }
            }
        }
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        self.children().map(Node::outer_html).collect()
    }
}

/// Get attributes as a string for HTML output
fn attributes_string(attrs: &IndexMap<String, String>) -> String {
    attrs
        .iter()
        .map(|(name, value)| {
            if value.is_empty() {
                name.clone()
            } else {
                format!("{}=\"{}\"", name, escape_html_attr(value))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape HTML attribute value
fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text content for HTML output
fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A reference to a node with parent context.
///
/// The parent's tag is carried explicitly so rules can inspect their
/// container without upward traversal.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    /// The node itself
    pub node: &'a Node,
    parent_tag: Option<&'a str>,
}

impl<'a> NodeRef<'a> {
    /// Create a new NodeRef without parent context
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            parent_tag: None,
        }
    }

    /// Create a new NodeRef with parent tag context
    pub fn with_parent(node: &'a Node, parent_tag: &'a str) -> Self {
        Self {
            node,
            parent_tag: Some(parent_tag),
        }
    }

    /// Get the parent tag name if known
    pub fn parent_tag(&self) -> Option<&'a str> {
        self.parent_tag
    }

    /// Check whether the immediate parent has the given tag
    pub fn parent_is(&self, tag: &str) -> bool {
        self.parent_tag
            .is_some_and(|parent| parent.eq_ignore_ascii_case(tag))
    }

    /// Delegate to Node methods
    pub fn is_element(&self) -> bool {
        self.node.is_element()
    }

    pub fn is_text(&self) -> bool {
        self.node.is_text()
    }

    pub fn tag_name(&self) -> &'a str {
        self.node.tag_name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.node.has_attr(name)
    }

    /// Iterate children, each carrying this node's tag as parent context
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let parent_tag = self.tag_name();
        self.node
            .children()
            .map(move |child| NodeRef::with_parent(child, parent_tag))
    }

    pub fn text_content(&self) -> String {
        self.node.text_content()
    }

    pub fn outer_html(&self) -> String {
        self.node.outer_html()
    }

    pub fn inner_html(&self) -> String {
        self.node.inner_html()
    }
}
