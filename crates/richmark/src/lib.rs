//! # richmark
//!
//! Convert rich text editor markup to Markdown.
//!
//! An editing surface produces markup; richmark turns that markup into a
//! tree of [`Node`]s and walks it once, post-order, applying a fixed rule per
//! tag. Every rule is a template over the already-converted content of its
//! children, so rules never recurse themselves.
//!
//! ## Design
//!
//! - **Tree in, string out**: the converter only consumes a [`Node`] tree.
//!   Parse HTML with [`parse_html`] (feature `html`) or build the tree directly.
//! - **Verbatim text**: text leaves are copied unchanged unless
//!   [`MarkdownOptions::escape_text`] is set.
//! - **Parent context without back-pointers**: [`NodeRef`] carries the tag of
//!   the parent, which is all the `code` and `li` rules need.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use richmark::{MarkdownConverter, Node};
//!
//! let converter = MarkdownConverter::new();
//!
//! let mut h1 = Node::element("h1");
//! h1.add_child(Node::text("Hello World"));
//! let root = Node::fragment().with_child(h1);
//!
//! assert_eq!(converter.convert(&root), "# Hello World");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use richmark::MarkdownConverter;
//!
//! let converter = MarkdownConverter::new();
//! let markdown = converter.convert_html("<ol><li>one</li><li>two</li></ol>");
//! assert_eq!(markdown, "1. one\n1. two");
//! ```

#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod rules;
mod service;
mod session;
mod utilities;

#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Element, Node, NodeRef, FRAGMENT_TAG};
pub use rules::{Action, Filter, Rule, RuleContext, Rules};
pub use service::{MarkdownConverter, MarkdownOptions};
pub use session::{EditorSession, Export, ExportFormat, Theme, DEFAULT_IMAGE_ALT};
pub use utilities::*;

/// Error type for richmark operations
#[derive(Debug, thiserror::Error)]
pub enum RichmarkError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RichmarkError>;
