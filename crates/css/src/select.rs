use html::traverse::walk_descendant_elements;
use html::{Id, Node};

use crate::syntax::{Combinator, ComplexSelector, CompoundSelector, Selector, SelectorList};

// Check if an element matches a simple selector
fn matches_simple(node: &Node, selector: &Selector) -> bool {
    let Some(name) = node.name() else {
        return false;
    };
    match selector {
        Selector::Universal => true,
        Selector::Type(t) => name.eq_ignore_ascii_case(t),
        Selector::Id(want) => node.attr("id") == Some(want.as_str()),
        Selector::Class(want) => node.attr_has_token("class", want),
        Selector::Attribute { name, value: None } => node.has_attr(name),
        Selector::Attribute {
            name,
            value: Some(want),
        } => node.attr(name) == Some(want.as_str()),
    }
}

/// Matches `node` against a compound selector without looking at its ancestors.
pub fn matches_compound(node: &Node, compound: &CompoundSelector) -> bool {
    compound.parts.iter().all(|s| matches_simple(node, s))
}

/// `ancestors` are the element ancestors of `node`, outermost first.
pub fn matches_complex(node: &Node, ancestors: &[&Node], selector: &ComplexSelector) -> bool {
    match selector.compounds.len() {
        0 => false,
        n => match_at(selector, n - 1, node, ancestors),
    }
}

pub fn matches_list(node: &Node, ancestors: &[&Node], list: &SelectorList) -> bool {
    list.selectors
        .iter()
        .any(|s| matches_complex(node, ancestors, s))
}

// Right-to-left: compound `idx` must match `node`, then the combinator to its left decides
// which ancestors may satisfy the rest.
fn match_at(selector: &ComplexSelector, idx: usize, node: &Node, ancestors: &[&Node]) -> bool {
    if !matches_compound(node, &selector.compounds[idx]) {
        return false;
    }
    if idx == 0 {
        return true;
    }
    match selector.combinators[idx - 1] {
        Combinator::Child => ancestors
            .split_last()
            .is_some_and(|(parent, rest)| match_at(selector, idx - 1, parent, rest)),
        Combinator::Descendant => (0..ancestors.len())
            .rev()
            .any(|i| match_at(selector, idx - 1, ancestors[i], &ancestors[..i])),
    }
}

/// All elements strictly inside `scope` that match `list`, in document order.
///
/// Matching sees the full ancestor chain from `root`, so `main p` matches a `<p>` under a
/// scope that itself sits inside `<main>`, like DOM `Element.querySelectorAll`.
pub fn query_selector_all(root: &Node, scope: Id, list: &SelectorList) -> Vec<Id> {
    let mut out = Vec::new();
    let whole_tree = root.id() == scope;
    walk_descendant_elements(root, &mut |node, ancestors| {
        let inside = whole_tree || ancestors.iter().any(|a| a.id() == scope);
        if inside && matches_list(node, ancestors, list) {
            out.push(node.id());
        }
    });
    log::trace!(target: "css", "selector matched {} element(s)", out.len());
    out
}
