use crate::{Id, Node};

/// Largest id present in the subtree (`Id::UNSET` counts as 0).
pub fn max_node_id(node: &Node) -> Id {
    let mut max = node.id();
    for c in node.children() {
        max = max.max(max_node_id(c));
    }
    max
}

/// Assigns fresh ids to every node that is still `Id::UNSET`, counting up from `next`.
/// Returns the next unused id.
pub fn assign_node_ids(root: &mut Node, next: Id) -> Id {
    fn walk(node: &mut Node, next: &mut u32) {
        if node.id().is_unset() {
            node.set_id(Id(*next));
            *next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = next.0.max(1);
    walk(root, &mut next);
    Id(next)
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children().iter().find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_by_id_mut(c, id))
}

/// Pre-order walk over every element below `node` (excluding `node` itself).
///
/// The callback sees the element together with its element ancestors, nearest last,
/// starting below `node`.
pub fn walk_descendant_elements<'a, F>(node: &'a Node, f: &mut F)
where
    F: FnMut(&'a Node, &[&'a Node]),
{
    fn walk<'a, F>(node: &'a Node, ancestors: &mut Vec<&'a Node>, f: &mut F)
    where
        F: FnMut(&'a Node, &[&'a Node]),
    {
        for c in node.children() {
            if !c.is_element() {
                continue;
            }
            f(c, ancestors);
            ancestors.push(c);
            walk(c, ancestors, f);
            ancestors.pop();
        }
    }

    let mut ancestors = Vec::new();
    walk(node, &mut ancestors, f);
}

pub fn is_non_rendering_element(node: &Node) -> bool {
    node.name().is_some_and(|name| {
        matches!(
            name,
            "head" | "style" | "script" | "title" | "meta" | "link" | "template"
        )
    })
}
