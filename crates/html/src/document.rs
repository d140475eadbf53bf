use crate::collect::text_content;
use crate::traverse::{assign_node_ids, find_node_by_id, find_node_by_id_mut, max_node_id};
use crate::{Id, Node, build_dom, tokenize};

/// An owned DOM tree plus the allocator that hands out node ids.
///
/// Ids are unique within a document and never reused, so a handle to a node that has been
/// replaced simply stops resolving.
#[derive(Clone, Debug)]
pub struct Document {
    root: Node,
    next_id: Id,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_root(Node::Document {
            id: Id::UNSET,
            doctype: None,
            children: Vec::new(),
        })
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(html: &str) -> Self {
        let tokens = tokenize(html);
        log::trace!(target: "html", "parsed {} tokens", tokens.len());
        Self::from_root(build_dom(&tokens))
    }

    /// Adopts an existing tree. Nodes that already carry ids keep them; unset ones are
    /// numbered after the largest id present.
    pub fn from_root(mut root: Node) -> Self {
        let start = Id(max_node_id(&root).0 + 1);
        let next_id = assign_node_ids(&mut root, start);
        Self { root, next_id }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> Id {
        self.root.id()
    }

    pub fn get(&self, id: Id) -> Option<&Node> {
        find_node_by_id(&self.root, id)
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut Node> {
        find_node_by_id_mut(&mut self.root, id)
    }

    pub fn is_element(&self, id: Id) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    pub fn alloc_id(&mut self) -> Id {
        let id = self.next_id;
        self.next_id = Id(id.0.wrapping_add(1));
        id
    }

    /// Creates a detached element with a fresh id. It joins the tree only once passed to
    /// [`Document::replace_children`] (directly or nested).
    pub fn create_element(&mut self, name: &str) -> Node {
        Node::element(self.alloc_id(), name)
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> Node {
        Node::text(self.alloc_id(), text)
    }

    pub fn text_content(&self, id: Id) -> Option<String> {
        self.get(id).map(text_content)
    }

    pub fn attr(&self, id: Id, key: &str) -> Option<&str> {
        self.get(id)?.attr(key)
    }

    pub fn set_attr(&mut self, id: Id, key: &str, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(node) if node.is_element() => {
                node.set_attr(key, value);
                true
            }
            _ => false,
        }
    }

    /// Swaps the children of `id` for `children`, returning the previous ones.
    /// `None` when `id` does not name a node that can hold children.
    pub fn replace_children(&mut self, id: Id, children: Vec<Node>) -> Option<Vec<Node>> {
        let slot = self.get_mut(id)?.children_mut()?;
        Some(std::mem::replace(slot, children))
    }

    pub fn take_children(&mut self, id: Id) -> Option<Vec<Node>> {
        self.replace_children(id, Vec::new())
    }
}
