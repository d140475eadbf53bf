use html::{Document, Id};
use layout::{FlowLayout, LayoutHost, LayoutSnapshot, MonospaceMeasurer};
use split::{LINE_INDEX_ATTR, SplitOptions, SplitResult, split_text};

fn line_texts(doc: &Document, result: &SplitResult) -> Vec<String> {
    result
        .lines
        .iter()
        .filter_map(|&id| doc.text_content(id))
        .collect()
}

fn target(doc: &Document) -> Id {
    doc.root().children()[0].id()
}

#[test]
fn narrow_container_wraps_words_into_lines() {
    let mut doc = Document::parse("<p>aaa bbb ccc ddd eee</p>");
    let p = target(&doc);
    // 10px per char: "aaa bbb" is 70px, adding " ccc" would need 110px.
    let mut host = FlowLayout::monospace(75.0);
    let result = split_text(&mut doc, &mut host, p, &SplitOptions::default()).expect("p");

    assert_eq!(line_texts(&doc, &result), vec!["aaa bbb ", "ccc ddd ", "eee"]);
    assert_eq!(host.passes(), 1);
    for (i, &line) in result.lines.iter().enumerate() {
        assert_eq!(doc.attr(line, LINE_INDEX_ATTR), Some(i.to_string().as_str()));
    }
    let p_node = doc.get(p).expect("p");
    assert_eq!(p_node.children().len(), 3, "only line wrappers remain");
}

#[test]
fn inline_wrappers_wrap_the_same_way() {
    let mut doc = Document::parse("<p>aaa bbb ccc ddd eee</p>");
    let p = target(&doc);
    let options = SplitOptions {
        inline: true,
        ..SplitOptions::default()
    };
    let result =
        split_text(&mut doc, &mut FlowLayout::monospace(75.0), p, &options).expect("p");
    assert_eq!(line_texts(&doc, &result), vec!["aaa bbb ", "ccc ddd ", "eee"]);
}

#[test]
fn width_decides_the_line_count() {
    let source = "<p>the same sentence at two different widths</p>";
    let mut narrow = Document::parse(source);
    let mut wide = Document::parse(source);
    let options = SplitOptions::default();

    let p = target(&narrow);
    let narrow_result =
        split_text(&mut narrow, &mut FlowLayout::monospace(120.0), p, &options).expect("p");
    let p = target(&wide);
    let wide_result =
        split_text(&mut wide, &mut FlowLayout::monospace(2000.0), p, &options).expect("p");

    assert_eq!(narrow_result.words.len(), wide_result.words.len());
    assert_eq!(wide_result.lines.len(), 1);
    assert!(narrow_result.lines.len() > 1);
}

#[test]
fn resplitting_after_a_resize_regroups_lines() {
    let mut doc = Document::parse("<p>one two three four five six</p>");
    let p = target(&doc);
    let mut host = FlowLayout::monospace(2000.0);
    let options = SplitOptions::default();
    let wide = split_text(&mut doc, &mut host, p, &options).expect("p");
    assert_eq!(wide.lines.len(), 1);

    host.set_width(90.0);
    let narrow = split_text(&mut doc, &mut host, p, &options).expect("p");
    assert_eq!(
        line_texts(&doc, &narrow),
        vec!["one two ", "three ", "four five ", "six"]
    );
    assert_eq!(host.passes(), 2);
}

#[test]
fn inline_block_words_wrap_apart_with_a_non_space_delimiter() {
    let source = "<p>alpha,beta,gamma,delta</p>";
    let options = SplitOptions::default().split_by(",");

    let mut narrow = Document::parse(source);
    let p = target(&narrow);
    // Each word box carries its trailing comma: 60, 50, 60 and 50px.
    let result =
        split_text(&mut narrow, &mut FlowLayout::monospace(80.0), p, &options).expect("p");
    assert_eq!(result.words.len(), 4);
    assert_eq!(
        line_texts(&narrow, &result),
        vec!["alpha,", "beta,", "gamma,", "delta"]
    );

    let mut wide = Document::parse(source);
    let p = target(&wide);
    let result = split_text(&mut wide, &mut FlowLayout::monospace(2000.0), p, &options).expect("p");
    assert_eq!(line_texts(&wide, &result), vec!["alpha,beta,gamma,delta"]);
}

#[test]
fn inline_words_with_a_non_space_delimiter_have_no_break_opportunity() {
    let mut doc = Document::parse("<p>alpha,beta,gamma,delta</p>");
    let p = target(&doc);
    let options = SplitOptions {
        inline: true,
        ..SplitOptions::default().split_by(",")
    };
    let result = split_text(&mut doc, &mut FlowLayout::monospace(80.0), p, &options).expect("p");
    assert_eq!(result.lines.len(), 1);
}

#[test]
fn a_word_wider_than_the_container_gets_its_own_line() {
    let mut doc = Document::parse("<p>a extraordinarily b</p>");
    let p = target(&doc);
    let result = split_text(
        &mut doc,
        &mut FlowLayout::new(MonospaceMeasurer::default(), 50.0),
        p,
        &SplitOptions::default(),
    )
    .expect("p");
    assert_eq!(line_texts(&doc, &result), vec!["a ", "extraordinarily ", "b"]);
}

/// Records how often geometry is read and what the container looked like at that moment.
struct ReadCounter {
    reads: usize,
    seen_children: Vec<usize>,
}

impl LayoutHost for ReadCounter {
    fn layout(&mut self, document: &Document, container: Id) -> LayoutSnapshot {
        self.reads += 1;
        self.seen_children
            .push(document.get(container).map_or(0, |n| n.children().len()));
        LayoutSnapshot::new()
    }
}

#[test]
fn geometry_is_read_once_between_the_two_commits() {
    let mut doc = Document::parse("<p>one two three</p>");
    let p = target(&doc);
    let mut counter = ReadCounter {
        reads: 0,
        seen_children: Vec::new(),
    };
    let result = split_text(&mut doc, &mut counter, p, &SplitOptions::default()).expect("p");
    assert_eq!(counter.reads, 1);
    // Three words and two separators were committed when the host looked.
    assert_eq!(counter.seen_children, vec![5]);
    // Nothing measured: every word stays on the first line.
    assert_eq!(result.lines.len(), 1);
}
