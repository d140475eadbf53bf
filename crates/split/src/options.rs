use std::fmt;
use std::sync::Arc;

use css::Display;
use html::Node;
use serde::Deserialize;

/// Decides whether the tree walker may consider an element. Rejecting an element also
/// skips everything below it.
pub type LeafFilter = Arc<dyn Fn(&Node) -> bool + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassNames {
    pub word: String,
    pub char: String,
    pub line: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            word: "split-word".to_string(),
            char: "split-char".to_string(),
            line: "split-line".to_string(),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitOptions {
    /// Word delimiter. An empty string keeps the whole text as one word.
    pub split_by: String,
    pub class_names: ClassNames,
    /// Use `display: inline` for wrappers instead of `display: inline-block`.
    pub inline: bool,
    /// Split every text-only descendant instead of the target's own text.
    pub recursive: bool,
    /// Only consulted in recursive mode.
    #[serde(skip)]
    pub filter: Option<LeafFilter>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            split_by: " ".to_string(),
            class_names: ClassNames::default(),
            inline: false,
            recursive: false,
            filter: None,
        }
    }
}

impl fmt::Debug for SplitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitOptions")
            .field("split_by", &self.split_by)
            .field("class_names", &self.class_names)
            .field("inline", &self.inline)
            .field("recursive", &self.recursive)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl SplitOptions {
    pub fn with_filter(mut self, filter: impl Fn(&Node) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn split_by(mut self, delimiter: impl Into<String>) -> Self {
        self.split_by = delimiter.into();
        self
    }

    /// Display applied to every generated wrapper.
    pub fn display(&self) -> Display {
        if self.inline {
            Display::Inline
        } else {
            Display::InlineBlock
        }
    }
}
