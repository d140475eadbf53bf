use html::{Document, Id};

use crate::{LayoutHost, LayoutSnapshot, MonospaceMeasurer, TextMeasurer};

mod engine;
mod tokens;

/// Reference [`LayoutHost`]: lays the container's inline content into lines of a fixed
/// available width.
///
/// - whitespace collapses like `white-space: normal`
/// - text wraps greedily at collapsible spaces
/// - `inline-block` boxes never break inside but may wrap on either side; `block` boxes and `<br>`
///   end the line
///
/// Every call to [`LayoutHost::layout`] counts as one pass, see [`FlowLayout::passes`].
#[derive(Clone, Debug)]
pub struct FlowLayout<M = MonospaceMeasurer> {
    measurer: M,
    width: f32,
    passes: usize,
}

impl FlowLayout<MonospaceMeasurer> {
    pub fn monospace(width: f32) -> Self {
        Self::new(MonospaceMeasurer::default(), width)
    }
}

impl<M: TextMeasurer> FlowLayout<M> {
    pub fn new(measurer: M, width: f32) -> Self {
        Self {
            measurer,
            width,
            passes: 0,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Number of layout passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl<M: TextMeasurer> LayoutHost for FlowLayout<M> {
    fn layout(&mut self, document: &Document, container: Id) -> LayoutSnapshot {
        self.passes += 1;
        let Some(node) = document.get(container) else {
            log::debug!(target: "layout", "layout requested for detached node {container:?}");
            return LayoutSnapshot::new();
        };
        let (items, leftover) = tokens::collect_flow_items(&self.measurer, node);
        let snapshot = engine::layout_items(&self.measurer, self.width, &items, &leftover);
        log::debug!(
            target: "layout",
            "pass {}: {} flow items, {} boxes at width {}",
            self.passes,
            items.len(),
            snapshot.len(),
            self.width
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tops(doc: &Document, snapshot: &LayoutSnapshot) -> Vec<(String, f32)> {
        let container = &doc.root().children()[0];
        container
            .children()
            .iter()
            .filter(|n| n.is_element())
            .map(|n| {
                (
                    html::text_content(n),
                    snapshot.offset_top(n.id()).unwrap_or(-1.0),
                )
            })
            .collect()
    }

    #[test]
    fn inline_block_words_wrap_at_spaces() {
        let doc = Document::parse(
            r#"<p><span style="display:inline-block">one</span> <span style="display:inline-block">two</span> <span style="display:inline-block">three</span></p>"#,
        );
        let p = doc.root().children()[0].id();
        let mut host = FlowLayout::monospace(80.0);
        let snapshot = host.layout(&doc, p);
        assert_eq!(
            tops(&doc, &snapshot),
            vec![
                ("one".to_string(), 0.0),
                ("two".to_string(), 0.0),
                ("three".to_string(), 20.0),
            ]
        );
        assert_eq!(host.passes(), 1);
    }

    #[test]
    fn wider_host_keeps_everything_on_one_line() {
        let doc = Document::parse("<p><em>one</em> <em>two</em> <em>three</em></p>");
        let p = doc.root().children()[0].id();
        let mut host = FlowLayout::monospace(80.0);
        host.set_width(1000.0);
        let snapshot = host.layout(&doc, p);
        assert!(tops(&doc, &snapshot).iter().all(|(_, y)| *y == 0.0));
    }

    #[test]
    fn unknown_container_is_empty_but_still_counted() {
        let doc = Document::parse("<p>x</p>");
        let mut host = FlowLayout::monospace(100.0);
        assert!(host.layout(&doc, Id(999)).is_empty());
        assert_eq!(host.passes(), 1);
    }
}
