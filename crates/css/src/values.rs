/// CSS `display` value, restricted to what inline flow needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    ListItem,
    None,
}

impl Display {
    pub fn as_str(self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::Inline => "inline",
            Display::InlineBlock => "inline-block",
            Display::ListItem => "list-item",
            Display::None => "none",
        }
    }

    /// Block-level boxes start and end their own line in inline flow.
    pub fn is_block_level(self) -> bool {
        matches!(self, Display::Block | Display::ListItem)
    }
}

/// Parse a `display` value into a Display enum.
/// Strict: unknown values are ignored by the caller.
pub fn parse_display(value: &str) -> Option<Display> {
    let v = value.trim().to_ascii_lowercase();

    match v.as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "list-item" => Some(Display::ListItem),
        "none" => Some(Display::None),
        _ => None,
    }
}
