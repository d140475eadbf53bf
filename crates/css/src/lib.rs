pub mod cascade;
pub mod select;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use cascade::{computed_display, default_display, get_inline_style};
pub use select::{matches_complex, matches_compound, matches_list, query_selector_all};
pub use syntax::{
    Combinator, ComplexSelector, CompoundSelector, Declaration, Selector, SelectorList,
    SelectorParseError, parse_declarations, parse_selector_list,
};
pub use values::{Display, parse_display};
