use css::{Display, computed_display};
use html::{Id, Node};

use crate::TextMeasurer;

// Flow item invariants:
// - `Space` is a single collapsible space; never emitted twice in a row, never first.
// - `opens` lists the elements whose first fragment starts at that item, outermost first.
// - Consecutive `Text` items with no `Space` between them form one unbreakable run; an `Atomic`
//   item always has a wrap opportunity before and after it.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum FlowItem {
    Text {
        text: String,
        opens: Vec<Id>,
    },
    Space,
    /// End the current line if it has content (block boundaries).
    LineEnd,
    /// Always start a new line (`<br>`).
    HardBreak,
    /// An inline-block: laid out as one unbreakable box. `inner` holds its descendant
    /// elements with their x offset inside the box and their own width.
    Atomic {
        width: f32,
        opens: Vec<Id>,
        inner: Vec<(Id, f32, f32)>,
    },
}

// ASCII whitespace set used for HTML-like collapsing (excludes NBSP).
fn is_collapsible_ws(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\t' | '\r' | '\u{0C}')
}

struct Collector<'m> {
    measurer: &'m dyn TextMeasurer,
    items: Vec<FlowItem>,
    pending_space: bool,
    pending_opens: Vec<Id>,
    has_content: bool,
}

impl Collector<'_> {
    fn flush_space(&mut self) {
        if !std::mem::take(&mut self.pending_space) {
            return;
        }
        let after_break = matches!(
            self.items.last(),
            None | Some(FlowItem::Space | FlowItem::LineEnd | FlowItem::HardBreak)
        );
        if !after_break && self.has_content {
            self.items.push(FlowItem::Space);
        }
    }

    fn push_word(&mut self, word: &mut String) {
        if word.is_empty() {
            return;
        }
        self.flush_space();
        self.has_content = true;
        self.items.push(FlowItem::Text {
            text: std::mem::take(word),
            opens: std::mem::take(&mut self.pending_opens),
        });
    }

    fn push_text(&mut self, text: &str) {
        let mut word = String::new();
        for ch in text.chars() {
            if is_collapsible_ws(ch) {
                self.push_word(&mut word);
                self.pending_space = true;
            } else {
                word.push(ch);
            }
        }
        self.push_word(&mut word);
    }

    fn push_break(&mut self, item: FlowItem) {
        self.pending_space = false;
        if item == FlowItem::LineEnd && matches!(self.items.last(), None | Some(FlowItem::LineEnd)) {
            return;
        }
        self.items.push(item);
    }

    fn push_node(&mut self, node: &Node) {
        match node {
            Node::Text { text, .. } => self.push_text(text),
            Node::Element { name, children, .. } => {
                let display = computed_display(node).unwrap_or(Display::Inline);
                match display {
                    Display::None => {}
                    Display::Block | Display::ListItem => {
                        self.push_break(FlowItem::LineEnd);
                        self.pending_opens.push(node.id());
                        for c in children {
                            self.push_node(c);
                        }
                        self.push_break(FlowItem::LineEnd);
                    }
                    Display::InlineBlock => self.push_atomic(node),
                    Display::Inline if &**name == "br" => {
                        self.pending_opens.push(node.id());
                        self.push_break(FlowItem::HardBreak);
                    }
                    Display::Inline => {
                        self.pending_opens.push(node.id());
                        for c in children {
                            self.push_node(c);
                        }
                    }
                }
            }
            Node::Document { children, .. } => {
                for c in children {
                    self.push_node(c);
                }
            }
            Node::Comment { .. } => {}
        }
    }

    fn push_atomic(&mut self, node: &Node) {
        let mut text = String::new();
        let mut inner = Vec::new();
        measure_atomic_contents(self.measurer, node, &mut text, &mut inner);
        let width = self.measurer.measure(text.trim_end());

        self.flush_space();
        self.has_content = true;
        let mut opens = std::mem::take(&mut self.pending_opens);
        opens.push(node.id());
        self.items.push(FlowItem::Atomic {
            width,
            opens,
            inner,
        });
    }
}

// Inline-block contents never wrap here; this only collapses whitespace and records where
// each descendant element starts inside the box.
fn measure_atomic_contents(
    measurer: &dyn TextMeasurer,
    node: &Node,
    text: &mut String,
    inner: &mut Vec<(Id, f32, f32)>,
) {
    for c in node.children() {
        match c {
            Node::Text { text: t, .. } => {
                for ch in t.chars() {
                    if is_collapsible_ws(ch) {
                        if !text.is_empty() && !text.ends_with(' ') {
                            text.push(' ');
                        }
                    } else {
                        text.push(ch);
                    }
                }
            }
            Node::Element { .. } => {
                if computed_display(c) == Some(Display::None) {
                    continue;
                }
                let x = measurer.measure(text);
                let slot = inner.len();
                inner.push((c.id(), x, 0.0));
                measure_atomic_contents(measurer, c, text, inner);
                inner[slot].2 = measurer.measure(text) - x;
            }
            _ => {}
        }
    }
}

/// Flattens the children of `container` into flow items. Elements that never reach any
/// content are returned separately so the engine can still give them a position.
pub(super) fn collect_flow_items(
    measurer: &dyn TextMeasurer,
    container: &Node,
) -> (Vec<FlowItem>, Vec<Id>) {
    let mut collector = Collector {
        measurer,
        items: Vec::new(),
        pending_space: false,
        pending_opens: Vec::new(),
        has_content: false,
    };
    for c in container.children() {
        collector.push_node(c);
    }
    // Trailing collapsible whitespace is not rendered.
    while matches!(collector.items.last(), Some(FlowItem::Space | FlowItem::LineEnd)) {
        collector.items.pop();
    }
    (collector.items, collector.pending_opens)
}
