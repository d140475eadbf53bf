use html::Node;

use crate::syntax::parse_declarations;
use crate::values::{Display, parse_display};

fn is_heading(name: &str) -> bool {
    let b = name.as_bytes();
    b.len() == 2 && (b[0] | 0x20) == b'h' && (b'1'..=b'6').contains(&b[1])
}

/// User-agent default `display` for an element name.
pub fn default_display(name: &str) -> Display {
    if is_heading(name) {
        return Display::Block;
    }
    match name {
        "html" | "body" | "div" | "p" | "section" | "article" | "header" | "footer" | "main"
        | "nav" | "aside" | "blockquote" | "pre" | "ul" | "ol" | "figure" | "form" => {
            Display::Block
        }
        "li" => Display::ListItem,
        "head" | "style" | "script" | "title" | "meta" | "link" | "template" => Display::None,
        _ => Display::Inline,
    }
}

// If the element has an inline style attribute, return its value
pub fn get_inline_style(node: &Node) -> Option<&str> {
    node.attr("style")
}

/// Computed `display`: the last valid `display` declaration in the inline `style`
/// attribute wins over the element's default. `None` for non-elements.
pub fn computed_display(node: &Node) -> Option<Display> {
    let name = node.name()?;
    let inline = get_inline_style(node).and_then(|style| {
        parse_declarations(style)
            .into_iter()
            .filter(|d| d.name == "display")
            .filter_map(|d| parse_display(&d.value))
            .last()
    });
    Some(inline.unwrap_or_else(|| default_display(name)))
}
