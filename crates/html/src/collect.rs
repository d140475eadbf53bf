use crate::Node;

/// Appends the concatenated data of every descendant text node, in tree order.
///
/// Mirrors DOM `textContent`: no trimming, no whitespace collapsing, comments skipped.
pub fn collect_text_content(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(text),
        Node::Document { children, .. } | Node::Element { children, .. } => {
            for c in children {
                collect_text_content(c, out);
            }
        }
        Node::Comment { .. } => {}
    }
}

pub fn text_content(node: &Node) -> String {
    let mut out = String::new();
    collect_text_content(node, &mut out);
    out
}

/// True when every direct child is a text node. Vacuously true for childless elements.
pub fn has_only_text_children(node: &Node) -> bool {
    node.children().iter().all(Node::is_text)
}

/// An element whose direct children are all text and whose text is not just whitespace.
pub fn is_text_leaf(node: &Node) -> bool {
    node.is_element()
        && has_only_text_children(node)
        && node.children().iter().any(|c| match c {
            Node::Text { text, .. } => !text.trim().is_empty(),
            _ => false,
        })
}
