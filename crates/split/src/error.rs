use css::SelectorParseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The target resolved to no live element. Raised before the document is touched.
    #[error("element not found")]
    ElementNotFound,

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        selector: String,
        reason: &'static str,
    },
}

impl From<SelectorParseError> for SplitError {
    fn from(err: SelectorParseError) -> Self {
        SplitError::InvalidSelector {
            selector: err.selector,
            reason: err.reason,
        }
    }
}
