//! Utility functions and constants for markup processing.

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Characters that carry meaning in Markdown text
const MARKDOWN_METACHARACTERS: &[char] = &['\\', '*', '_', '[', ']', '#', '+', '-', '!', '`'];

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Repeat a string n times
pub fn repeat(s: &str, n: usize) -> String {
    s.repeat(n)
}

/// Escape markdown special characters
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        if MARKDOWN_METACHARACTERS.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}
