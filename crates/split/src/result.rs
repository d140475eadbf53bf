use html::Id;

/// Wrappers created by one or more splits, in document order.
///
/// Handles stay valid until the wrappers are replaced, e.g. by splitting the same element
/// again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitResult {
    pub chars: Vec<Id>,
    pub words: Vec<Id>,
    pub lines: Vec<Id>,
}

impl SplitResult {
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.words.is_empty() && self.lines.is_empty()
    }

    /// Appends `other` after `self`, keeping each sequence in encounter order.
    pub fn extend(&mut self, other: SplitResult) {
        self.chars.extend(other.chars);
        self.words.extend(other.words);
        self.lines.extend(other.lines);
    }
}
