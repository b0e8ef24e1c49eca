//! Built-in rules for markup produced by the editor surface.
//!
//! Every rule is a string template over the already-converted inner content.
//! Only `code` and `li` look past their own node, and only at the tag of the
//! immediate parent.

use super::{Filter, Rule};
use crate::utilities::repeat;

/// Create all built-in editor rules
pub fn editor_rules() -> Vec<Rule> {
    vec![
        heading_rule(),
        paragraph_rule(),
        strong_rule(),
        emphasis_rule(),
        underline_rule(),
        link_rule(),
        code_block_rule(),
        code_rule(),
        list_rule(),
        list_item_rule(),
        line_break_rule(),
        span_rule(),
    ]
}

fn heading_rule() -> Rule {
    Rule::for_tags(&["h1", "h2", "h3"], |cx| {
        let level: usize = cx.tag()[1..].parse().unwrap_or(1);
        format!("{} {}", repeat("#", level), cx.block())
    })
}

fn paragraph_rule() -> Rule {
    Rule::for_tags(&["p"], |cx| cx.block())
}

fn strong_rule() -> Rule {
    Rule::for_tags(&["strong", "b"], |cx| cx.wrap(&cx.options.strong_delimiter))
}

fn emphasis_rule() -> Rule {
    Rule::for_tags(&["em", "i"], |cx| cx.wrap(cx.options.em_delimiter))
}

// Markdown has no underline; the raw tag survives.
fn underline_rule() -> Rule {
    Rule::for_tags(&["u"], |cx| format!("<u>{}</u>", cx.content))
}

fn link_rule() -> Rule {
    Rule::for_tags(&["a"], |cx| {
        format!("[{}]({})", cx.content, cx.attr("href").unwrap_or_default())
    })
}

fn code_block_rule() -> Rule {
    Rule::for_tags(&["pre"], |cx| {
        let fence = &cx.options.fence;
        format!("{fence}\n{}\n{fence}\n\n", cx.content)
    })
}

fn code_rule() -> Rule {
    Rule::for_tags(&["code"], |cx| {
        // the enclosing <pre> supplies the fence
        if cx.parent_is("pre") {
            cx.content.to_string()
        } else {
            cx.wrap('`')
        }
    })
}

fn list_rule() -> Rule {
    Rule::for_tags(&["ul", "ol"], |cx| cx.content.to_string())
}

fn list_item_rule() -> Rule {
    Rule::for_tags(&["li"], |cx| {
        if cx.parent_is("ol") {
            format!("{} {}\n", cx.options.ordered_list_marker, cx.content)
        } else {
            format!("{} {}\n", cx.options.bullet_list_marker, cx.content)
        }
    })
}

fn line_break_rule() -> Rule {
    Rule::for_tags(&["br"], |_| "\n".to_string())
}

/// Inline font-size styling has no Markdown equivalent and is dropped.
fn span_rule() -> Rule {
    Rule::new(Filter::tag("span"), |cx| cx.content.to_string())
}
