//! Owned DOM model: node tree, fragment tokenizer and tree builder, text collection,
//! serialization, and test snapshots.
pub mod collect;
pub mod debug;
#[cfg(any(test, feature = "dom-snapshot"))]
pub mod dom_snapshot;
pub mod serialize;
pub mod traverse;

mod document;
mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::collect::{has_only_text_children, is_text_leaf, text_content};
pub use crate::document::Document;
pub use crate::dom_builder::build_dom;
pub use crate::serialize::{inner_html, to_html};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, Node, NodeId, Token};
