use crate::Node;
use std::fmt::{self, Write};

/// Deterministic DOM serialization and comparison for tests.
/// Not a stable format.
///
/// Equivalence rules:
/// - node kinds, element names and text/comment data must match exactly;
/// - attribute order is significant;
/// - ids are compared only when `ignore_ids` is false.
#[derive(Clone, Copy, Debug)]
pub struct DomSnapshotOptions {
    pub ignore_ids: bool,
}

impl Default for DomSnapshotOptions {
    fn default() -> Self {
        Self { ignore_ids: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &Node, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, &options, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Debug)]
pub struct DomMismatch {
    path: String,
    detail: String,
    expected: String,
    actual: String,
}

impl fmt::Display for DomMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DOM mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected subtree:\n{}", self.expected)?;
        write!(f, "actual subtree:\n{}", self.actual)
    }
}

impl std::error::Error for DomMismatch {}

pub fn assert_dom_eq(expected: &Node, actual: &Node, options: DomSnapshotOptions) {
    if let Err(mismatch) = compare_dom(expected, actual, options) {
        panic!("{mismatch}");
    }
}

pub fn compare_dom(
    expected: &Node,
    actual: &Node,
    options: DomSnapshotOptions,
) -> Result<(), Box<DomMismatch>> {
    let mut path = vec![node_label(expected)];
    compare_nodes(expected, actual, &options, &mut path)
}

fn compare_nodes(
    expected: &Node,
    actual: &Node,
    options: &DomSnapshotOptions,
    path: &mut Vec<String>,
) -> Result<(), Box<DomMismatch>> {
    let detail: Option<String> = if !options.ignore_ids && expected.id() != actual.id() {
        Some("node id".to_string())
    } else {
        node_difference(expected, actual)
    };
    if let Some(detail) = detail {
        return Err(Box::new(mismatch(path, &detail, expected, actual, options)));
    }

    let (a_children, b_children) = (expected.children(), actual.children());
    for (idx, (a, b)) in a_children.iter().zip(b_children).enumerate() {
        path.push(format!("{}[{}]", node_label(a), idx));
        let result = compare_nodes(a, b, options, path);
        path.pop();
        result?;
    }
    Ok(())
}

/// Differences local to the node itself (not its children), including child count.
fn node_difference(expected: &Node, actual: &Node) -> Option<String> {
    match (expected, actual) {
        (Node::Document { doctype: a, .. }, Node::Document { doctype: b, .. }) if a != b => {
            return Some("doctype".to_string());
        }
        (Node::Document { .. }, Node::Document { .. }) => {}
        (
            Node::Element {
                name: a_name,
                attributes: a_attrs,
                ..
            },
            Node::Element {
                name: b_name,
                attributes: b_attrs,
                ..
            },
        ) => {
            if a_name != b_name {
                return Some("element name".to_string());
            }
            if a_attrs.len() != b_attrs.len() {
                return Some("attribute count".to_string());
            }
            if let Some(i) = a_attrs.iter().zip(b_attrs).position(|(a, b)| a != b) {
                return Some(format!("attribute at index {i}"));
            }
        }
        (Node::Text { text: a, .. }, Node::Text { text: b, .. }) => {
            return (a != b).then(|| "text".to_string());
        }
        (Node::Comment { text: a, .. }, Node::Comment { text: b, .. }) => {
            return (a != b).then(|| "comment".to_string());
        }
        _ => return Some("node kind".to_string()),
    }

    let (a, b) = (expected.children().len(), actual.children().len());
    (a != b).then(|| format!("child count (expected {a}, actual {b})"))
}

fn mismatch(
    path: &[String],
    detail: &str,
    expected: &Node,
    actual: &Node,
    options: &DomSnapshotOptions,
) -> DomMismatch {
    DomMismatch {
        path: format!("/{}", path.join("/")),
        detail: detail.to_string(),
        expected: DomSnapshot::new(expected, *options).render(),
        actual: DomSnapshot::new(actual, *options).render(),
    }
}

fn node_label(node: &Node) -> String {
    match node {
        Node::Document { .. } => "#document".to_string(),
        Node::Element { name, .. } => {
            let mut label = name.to_string();
            if let Some(id) = node.attr("id").filter(|v| !v.is_empty()) {
                label.push('#');
                write_escaped(&mut label, id);
            } else if let Some(class) = node.attr("class").filter(|v| !v.is_empty()) {
                label.push_str(".class=");
                write_escaped(&mut label, class);
            }
            label
        }
        Node::Text { .. } => "#text".to_string(),
        Node::Comment { .. } => "#comment".to_string(),
    }
}

fn walk_snapshot(node: &Node, options: &DomSnapshotOptions, depth: usize, out: &mut Vec<String>) {
    let mut line = "  ".repeat(depth);
    match node {
        Node::Document { doctype, .. } => {
            line.push_str("#document");
            if let Some(dt) = doctype {
                line.push_str(" doctype=\"");
                write_escaped(&mut line, dt);
                line.push('"');
            }
        }
        Node::Element {
            name, attributes, ..
        } => {
            line.push('<');
            line.push_str(name);
            for (key, value) in attributes {
                line.push(' ');
                line.push_str(key);
                if let Some(value) = value {
                    line.push_str("=\"");
                    write_escaped(&mut line, value);
                    line.push('"');
                }
            }
            line.push('>');
        }
        Node::Text { text, .. } => {
            line.push('"');
            write_escaped(&mut line, text);
            line.push('"');
        }
        Node::Comment { text, .. } => {
            line.push_str("<!-- ");
            write_escaped(&mut line, text);
            line.push_str(" -->");
        }
    }
    if !options.ignore_ids {
        let _ = write!(line, " @{}", node.id().0);
    }
    out.push(line);
    for c in node.children() {
        walk_snapshot(c, options, depth + 1, out);
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ if ch.is_ascii() => out.push(ch),
            _ => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
        }
    }
}
