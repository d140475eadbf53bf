use html::Id;

use crate::{LayoutSnapshot, Rect, TextMeasurer};

use super::tokens::FlowItem;

struct Cursor {
    x: f32,
    line: usize,
    line_has_content: bool,
}

impl Cursor {
    fn new_line(&mut self) {
        self.x = 0.0;
        self.line += 1;
        self.line_has_content = false;
    }
}

fn item_width(measurer: &dyn TextMeasurer, item: &FlowItem) -> f32 {
    match item {
        FlowItem::Text { text, .. } => measurer.measure(text),
        FlowItem::Atomic { width, .. } => *width,
        FlowItem::Space | FlowItem::LineEnd | FlowItem::HardBreak => 0.0,
    }
}

/// Greedy line breaking: an unbreakable run moves to the next line when it would overflow
/// `available_width` and the current line already has content. A run wider than the whole
/// line overflows on a line of its own.
///
/// Runs are maximal sequences of `Text` items with no `Space` between them. Every `Atomic`
/// item is a run of its own.
pub(super) fn layout_items(
    measurer: &dyn TextMeasurer,
    available_width: f32,
    items: &[FlowItem],
    leftover: &[Id],
) -> LayoutSnapshot {
    let line_height = measurer.line_height();
    let space_width = measurer.measure(" ");
    let mut snapshot = LayoutSnapshot::new();
    let mut cur = Cursor {
        x: 0.0,
        line: 0,
        line_has_content: false,
    };
    let mut pending_space = false;

    let mut i = 0;
    while i < items.len() {
        match &items[i] {
            FlowItem::Space => {
                pending_space = cur.line_has_content;
                i += 1;
                continue;
            }
            FlowItem::LineEnd => {
                if cur.line_has_content {
                    cur.new_line();
                }
                pending_space = false;
                i += 1;
                continue;
            }
            FlowItem::HardBreak => {
                place_opens(&mut snapshot, opens_of(&items[i]), &cur, 0.0, line_height);
                cur.new_line();
                pending_space = false;
                i += 1;
                continue;
            }
            FlowItem::Text { .. } | FlowItem::Atomic { .. } => {}
        }

        let run_end = (i + 1..items.len())
            .find(|&j| !joins_run(&items[j - 1], &items[j]))
            .unwrap_or(items.len());
        let run = &items[i..run_end];
        let run_width: f32 = run.iter().map(|item| item_width(measurer, item)).sum();

        let mut lead = if pending_space { space_width } else { 0.0 };
        if cur.line_has_content && cur.x + lead + run_width > available_width {
            log::trace!(
                target: "layout",
                "wrap before run of width {run_width} at x={} on line {}",
                cur.x,
                cur.line
            );
            cur.new_line();
            lead = 0.0;
        }
        cur.x += lead;
        pending_space = false;

        for item in run {
            let width = item_width(measurer, item);
            place_opens(&mut snapshot, opens_of(item), &cur, width, line_height);
            if let FlowItem::Atomic { inner, .. } = item {
                let y = cur.line as f32 * line_height;
                for &(id, dx, w) in inner {
                    snapshot.insert(
                        id,
                        Rect {
                            x: cur.x + dx,
                            y,
                            width: w,
                            height: line_height,
                        },
                    );
                }
            }
            cur.x += width;
        }
        cur.line_has_content = true;
        i = run_end;
    }

    place_opens(&mut snapshot, leftover, &cur, 0.0, line_height);
    snapshot
}

// Text glued to text stays together; an atomic box has a wrap opportunity on both sides.
fn joins_run(prev: &FlowItem, next: &FlowItem) -> bool {
    matches!(
        (prev, next),
        (FlowItem::Text { .. }, FlowItem::Text { .. })
    )
}

fn opens_of(item: &FlowItem) -> &[Id] {
    match item {
        FlowItem::Text { opens, .. } | FlowItem::Atomic { opens, .. } => opens,
        FlowItem::Space | FlowItem::LineEnd | FlowItem::HardBreak => &[],
    }
}

fn place_opens(snapshot: &mut LayoutSnapshot, ids: &[Id], cur: &Cursor, width: f32, line_height: f32) {
    let rect = Rect {
        x: cur.x,
        y: cur.line as f32 * line_height,
        width,
        height: line_height,
    };
    for &id in ids {
        snapshot.insert(id, rect);
    }
}
