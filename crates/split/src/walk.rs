use html::traverse::is_non_rendering_element;
use html::{Document, Id, Node, is_text_leaf};

/// Depth-first, pre-order search for the text-only elements below `root`.
///
/// `root` itself is never a candidate. At every element:
/// - a `predicate` rejection drops the element and its whole subtree
/// - a text leaf (only text children, some non-whitespace text) is taken as is
/// - anything else is skipped and its children are visited
///
/// Non-rendering elements such as `<script>` are never entered.
pub fn find_splittable_leaves(
    document: &Document,
    root: Id,
    predicate: Option<&(dyn Fn(&Node) -> bool + Send + Sync)>,
) -> Vec<Id> {
    let mut out = Vec::new();
    if let Some(node) = document.get(root) {
        visit(node, predicate, &mut out);
    }
    log::trace!(target: "split", "found {} splittable leaves under {root:?}", out.len());
    out
}

fn visit(
    node: &Node,
    predicate: Option<&(dyn Fn(&Node) -> bool + Send + Sync)>,
    out: &mut Vec<Id>,
) {
    for child in node.children().iter().filter(|c| c.is_element()) {
        if is_non_rendering_element(child) {
            continue;
        }
        if let Some(accept) = predicate
            && !accept(child)
        {
            continue;
        }
        if is_text_leaf(child) {
            out.push(child.id());
        } else {
            visit(child, predicate, out);
        }
    }
}
