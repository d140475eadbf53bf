use std::collections::HashMap;

use css::{parse_selector_list, query_selector_all};
use html::{Document, Id};

use crate::error::SplitError;

/// What to split: one element, several elements, or a selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Element(Id),
    Elements(Vec<Id>),
    Selector(String),
}

impl From<Id> for Target {
    fn from(id: Id) -> Self {
        Target::Element(id)
    }
}

impl From<Vec<Id>> for Target {
    fn from(ids: Vec<Id>) -> Self {
        Target::Elements(ids)
    }
}

impl From<&[Id]> for Target {
    fn from(ids: &[Id]) -> Self {
        Target::Elements(ids.to_vec())
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

/// Where selector targets are looked up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchRoot {
    #[default]
    Document,
    /// Only descendants of this element match; ancestors above it still count for
    /// combinators.
    Element(Id),
}

/// Match lists captured by the caller, keyed by selector text.
///
/// The locator only reads it. Entries are never invalidated automatically.
#[derive(Clone, Debug, Default)]
pub struct SelectorCache {
    entries: HashMap<String, Vec<Id>>,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, selector: impl Into<String>, matches: Vec<Id>) {
        self.entries.insert(selector.into(), matches);
    }

    pub fn get(&self, selector: &str) -> Option<&[Id]> {
        self.entries.get(selector).map(Vec::as_slice)
    }

    pub fn remove(&mut self, selector: &str) -> Option<Vec<Id>> {
        self.entries.remove(selector)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turns a [`Target`] into live element ids.
#[derive(Clone, Copy, Debug, Default)]
pub struct Locator<'c> {
    root: SearchRoot,
    cache: Option<&'c SelectorCache>,
}

impl<'c> Locator<'c> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: SearchRoot) -> Self {
        self.root = root;
        self
    }

    pub fn with_cache(mut self, cache: &'c SelectorCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn root(&self) -> SearchRoot {
        self.root
    }

    /// Resolves `target` to element ids in order. Ids that no longer name an element in
    /// `document` are dropped, so the result may be empty.
    pub fn resolve(&self, document: &Document, target: &Target) -> Result<Vec<Id>, SplitError> {
        let ids = match target {
            Target::Element(id) => vec![*id],
            Target::Elements(ids) => ids.clone(),
            Target::Selector(selector) => self.query(document, selector)?,
        };
        let before = ids.len();
        let live: Vec<Id> = ids
            .into_iter()
            .filter(|&id| document.is_element(id))
            .collect();
        if live.len() != before {
            log::debug!(target: "split", "dropped {} stale target(s)", before - live.len());
        }
        Ok(live)
    }

    fn query(&self, document: &Document, selector: &str) -> Result<Vec<Id>, SplitError> {
        if let Some(hit) = self.cache.and_then(|cache| cache.get(selector)) {
            log::trace!(target: "split", "selector cache hit for `{selector}`");
            return Ok(hit.to_vec());
        }
        let list = parse_selector_list(selector)?;
        let scope = match self.root {
            SearchRoot::Document => document.root_id(),
            SearchRoot::Element(id) => id,
        };
        Ok(query_selector_all(document.root(), scope, &list))
    }
}
