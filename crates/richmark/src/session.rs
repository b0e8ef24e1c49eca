//! Editor session state and document export.
//!
//! An [`EditorSession`] owns everything an editing surface needs between
//! events: the document tree, the active theme and the converter used for
//! Markdown export. Handlers receive the session by reference.

use tracing::debug;

use crate::node::Node;
use crate::service::MarkdownConverter;
use crate::{Result, RichmarkError};

/// Alt text used when an image is inserted without one
pub const DEFAULT_IMAGE_ALT: &str = "Image";

/// Color theme of the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Export target format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// The serialized markup as-is
    Html,
    /// Markdown produced by the converter
    Markdown,
}

impl ExportFormat {
    /// File name offered for download
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Html => "document.html",
            ExportFormat::Markdown => "document.md",
        }
    }

    /// MIME type of the exported contents
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html",
            ExportFormat::Markdown => "text/markdown",
        }
    }
}

/// An exported document, ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

/// State of one editing session
pub struct EditorSession {
    document: Node,
    theme: Theme,
    converter: MarkdownConverter,
}

impl EditorSession {
    /// Create a session with an empty document
    pub fn new() -> Self {
        Self::with_converter(MarkdownConverter::new())
    }

    /// Create a session that exports Markdown with the given converter
    pub fn with_converter(converter: MarkdownConverter) -> Self {
        Self {
            document: Node::fragment(),
            theme: Theme::default(),
            converter,
        }
    }

    /// Restore a session from previously saved markup
    #[cfg(feature = "html")]
    pub fn from_markup(markup: &str) -> Self {
        let mut session = Self::new();
        session.document = crate::html::parse_html(markup);
        session
    }

    /// Replace the converter used for Markdown export
    pub fn set_converter(&mut self, converter: MarkdownConverter) {
        self.converter = converter;
    }

    /// The document tree
    pub fn document(&self) -> &Node {
        &self.document
    }

    /// Serialized markup of the document; this is what gets persisted
    pub fn markup(&self) -> String {
        self.document.inner_html()
    }

    /// Number of characters of visible text
    pub fn char_count(&self) -> usize {
        self.document.text_content().chars().count()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch between light and dark, returning the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Append a node at the end of the document
    pub fn append(&mut self, node: Node) {
        self.document.add_child(node);
    }

    /// Insert a link at the end of the document.
    ///
    /// URLs that do not start with `http` get an `https://` prefix. When
    /// `text` is empty the URL itself becomes the link text.
    pub fn insert_link(&mut self, url: &str, text: Option<&str>) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(RichmarkError::InvalidInput("link URL is empty".to_string()));
        }

        let href = if url.starts_with("http") {
            url.to_string()
        } else {
            format!("https://{}", url)
        };
        let label = text.filter(|t| !t.is_empty()).unwrap_or(url);

        let link = Node::element_with_attrs(
            "a",
            vec![
                ("href", href.as_str()),
                ("target", "_blank"),
                ("rel", "noopener noreferrer"),
            ],
        )
        .with_child(Node::text(label));

        debug!(href = %href, "inserted link");
        self.append(link);
        Ok(())
    }

    /// Insert an image followed by an empty paragraph to keep typing in
    pub fn insert_image(&mut self, src: &str, alt: Option<&str>) -> Result<()> {
        let src = src.trim();
        if src.is_empty() {
            return Err(RichmarkError::InvalidInput("image source is empty".to_string()));
        }

        let alt = alt
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_IMAGE_ALT);

        let image = Node::element_with_attrs(
            "img",
            vec![("src", src), ("alt", alt), ("style", "max-width: 100%;")],
        );

        self.append(image);
        self.append(Node::element("p").with_child(Node::element("br")));
        Ok(())
    }

    /// Insert a code block holding `code`
    pub fn insert_code_block(&mut self, code: &str) {
        let block = Node::element("pre").with_child(Node::element("code").with_child(Node::text(code)));
        self.append(block);
    }

    /// Export the document in the given format
    pub fn export(&self, format: ExportFormat) -> Export {
        let contents = match format {
            ExportFormat::Html => self.markup(),
            ExportFormat::Markdown => self.converter.convert(&self.document),
        };

        Export {
            file_name: format.file_name(),
            mime_type: format.mime_type(),
            contents,
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
