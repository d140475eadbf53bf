//! Splits the text of DOM elements into addressable line, word and char wrappers.
//!
//! ```text
//! <p>Hello world</p>
//!
//! <p aria-label="Hello world">
//!   <span class="split-line" data-line-index="0">
//!     <span class="split-word" data-word-index="0">
//!       <span class="split-char" data-char-index="0">H</span>...
//!     </span>
//!     " "
//!     <span class="split-word" data-word-index="1">...</span>
//!   </span>
//! </p>
//! ```
//!
//! Line membership comes from a [`LayoutHost`], so the same text splits differently at
//! different container widths.
use std::collections::HashSet;

use html::Document;
use layout::LayoutHost;

mod error;
mod locate;
mod options;
mod result;
mod splitter;
mod walk;

pub use error::SplitError;
pub use locate::{Locator, SearchRoot, SelectorCache, Target};
pub use options::{ClassNames, LeafFilter, SplitOptions};
pub use result::SplitResult;
pub use splitter::{
    CHAR_INDEX_ATTR, LABEL_ATTR, LINE_INDEX_ATTR, WORD_INDEX_ATTR, delimiter_class, split,
    word_tokens,
};
pub use walk::find_splittable_leaves;

/// Resolves `target` against the whole document and splits it.
///
/// Without `recursive` only the first resolved element is split. With it, every text
/// leaf below each resolved element is split on its own and the results are concatenated
/// in document order. Errors with [`SplitError::ElementNotFound`] when nothing resolves,
/// before touching the document.
pub fn split_text<H: LayoutHost + ?Sized>(
    document: &mut Document,
    host: &mut H,
    target: impl Into<Target>,
    options: &SplitOptions,
) -> Result<SplitResult, SplitError> {
    split_text_with(document, host, &Locator::new(), target, options)
}

/// [`split_text`] with a custom search root or selector cache.
pub fn split_text_with<H: LayoutHost + ?Sized>(
    document: &mut Document,
    host: &mut H,
    locator: &Locator<'_>,
    target: impl Into<Target>,
    options: &SplitOptions,
) -> Result<SplitResult, SplitError> {
    let targets = locator.resolve(document, &target.into())?;
    let Some(&first) = targets.first() else {
        return Err(SplitError::ElementNotFound);
    };
    if !options.recursive {
        if targets.len() > 1 {
            log::debug!(target: "split", "{} targets resolved, splitting the first", targets.len());
        }
        return split(document, host, first, options);
    }

    let mut seen = HashSet::new();
    let leaves: Vec<_> = targets
        .iter()
        .flat_map(|&root| find_splittable_leaves(document, root, options.filter.as_deref()))
        .filter(|id| seen.insert(*id))
        .collect();
    if leaves.is_empty() {
        log::debug!(target: "split", "no splittable leaves under {} target(s)", targets.len());
    }

    let mut combined = SplitResult::default();
    for leaf in leaves {
        combined.extend(split(document, host, leaf, options)?);
    }
    Ok(combined)
}
