use crate::Node;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

/// Attributes shown next to an element in the outline, in this order.
const OUTLINE_ATTRS: &[&str] = &[
    "id",
    "class",
    "data-line-index",
    "data-word-index",
    "data-char-index",
    "aria-label",
];

fn push_preview(out: &mut String, s: &str) {
    for (i, ch) in s.chars().enumerate() {
        if i == PREVIEW_CHARS {
            out.push('…');
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}

/// Human-readable, indented outline of a subtree, capped at `cap` lines.
///
/// Text is shown quoted (whitespace-only text nodes are shown as `" "` so that separators
/// between split words stay visible).
pub fn outline_from_dom(root: &Node, cap: usize) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let mut line = INDENT_STEP.repeat(depth);
        match node {
            Node::Document { doctype, .. } => match doctype {
                Some(dt) => {
                    line.push_str("<!");
                    line.push_str(dt);
                    line.push('>');
                }
                None => line.push_str("#document"),
            },
            Node::Element { name, .. } => {
                line.push('<');
                line.push_str(name);
                for key in OUTLINE_ATTRS {
                    if let Some(value) = node.attr(key) {
                        line.push(' ');
                        line.push_str(key);
                        line.push_str("=\"");
                        push_preview(&mut line, value);
                        line.push('"');
                    }
                }
                line.push('>');
            }
            Node::Text { text, .. } => {
                line.push('"');
                if text.trim().is_empty() {
                    line.push(' ');
                } else {
                    push_preview(&mut line, text);
                }
                line.push('"');
            }
            Node::Comment { text, .. } => {
                line.push_str("<!-- ");
                push_preview(&mut line, text.trim());
                line.push_str(" -->");
            }
        }
        out.push(line);
        for c in node.children() {
            walk(c, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}
