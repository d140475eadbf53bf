use html::{Document, Id, Node};
use layout::{LayoutHost, LayoutSnapshot};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::SplitError;
use crate::options::SplitOptions;
use crate::result::SplitResult;

pub const WORD_INDEX_ATTR: &str = "data-word-index";
pub const CHAR_INDEX_ATTR: &str = "data-char-index";
pub const LINE_INDEX_ATTR: &str = "data-line-index";
pub const LABEL_ATTR: &str = "aria-label";

/// Class added next to the char class on injected delimiter wrappers.
pub fn delimiter_class(char_class: &str) -> String {
    format!("{char_class}--delimiter")
}

/// Tokens between delimiter occurrences, empty ones dropped.
pub fn word_tokens<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return if text.is_empty() { Vec::new() } else { vec![text] };
    }
    text.split(delimiter).filter(|t| !t.is_empty()).collect()
}

/// Splits the text of `element` into line, word and char wrappers.
///
/// Two commits with one layout read in between: the words are committed first, the host
/// reports where each word landed, then the words are regrouped into one wrapper per
/// rendered line.
pub fn split<H: LayoutHost + ?Sized>(
    document: &mut Document,
    host: &mut H,
    element: Id,
    options: &SplitOptions,
) -> Result<SplitResult, SplitError> {
    if !document.is_element(element) {
        return Err(SplitError::ElementNotFound);
    }
    let text = document
        .text_content(element)
        .ok_or(SplitError::ElementNotFound)?;
    document.set_attr(element, LABEL_ATTR, text.as_str());

    let mut result = SplitResult::default();
    let words = build_words(document, &text, options, &mut result);
    document
        .replace_children(element, words)
        .ok_or(SplitError::ElementNotFound)?;

    let snapshot = host.layout(document, element);

    let committed = document
        .take_children(element)
        .ok_or(SplitError::ElementNotFound)?;
    let groups = group_lines(committed, &snapshot);
    let lines = build_lines(document, groups, options, &mut result.lines);
    document
        .replace_children(element, lines)
        .ok_or(SplitError::ElementNotFound)?;

    log::debug!(
        target: "split",
        "split {element:?}: {} chars, {} words, {} lines",
        result.chars.len(),
        result.words.len(),
        result.lines.len()
    );
    Ok(result)
}

fn wrapper(document: &mut Document, class: &str, options: &SplitOptions) -> Node {
    let mut node = document.create_element("span");
    if !class.is_empty() {
        node.set_attr("class", class);
    }
    node.set_attr("style", format!("display: {}", options.display().as_str()));
    node
}

fn build_words(
    document: &mut Document,
    text: &str,
    options: &SplitOptions,
    result: &mut SplitResult,
) -> Vec<Node> {
    let classes = &options.class_names;
    let delimiter = options.split_by.as_str();
    let tokens = word_tokens(text, delimiter);
    let mut out = Vec::with_capacity(tokens.len() * 2);

    for (word_index, token) in tokens.iter().enumerate() {
        let mut word = wrapper(document, &classes.word, options);
        word.set_attr(WORD_INDEX_ATTR, word_index.to_string());
        result.words.push(word.id());

        for (char_index, grapheme) in token.graphemes(true).enumerate() {
            let mut ch = wrapper(document, &classes.char, options);
            ch.set_attr(CHAR_INDEX_ATTR, char_index.to_string());
            ch.push_child(document.create_text(grapheme));
            result.chars.push(ch.id());
            word.push_child(ch);
        }

        let last = word_index + 1 == tokens.len();
        if !last && delimiter != " " {
            let class = format!("{} {}", classes.char, delimiter_class(&classes.char));
            let mut sep = wrapper(document, class.trim(), options);
            sep.push_child(document.create_text(delimiter));
            word.push_child(sep);
        }
        out.push(word);
        if !last && delimiter == " " {
            out.push(document.create_text(" "));
        }
    }
    out
}

// A word opens a new line when it sits strictly lower than the line's first measured word
// and the line already has a word. Text nodes stay with the word before them.
fn group_lines(nodes: Vec<Node>, snapshot: &LayoutSnapshot) -> Vec<Vec<Node>> {
    let mut groups: Vec<Vec<Node>> = Vec::new();
    let mut line_top: Option<f32> = None;

    for node in nodes {
        if !node.is_element() {
            match groups.last_mut() {
                Some(group) => group.push(node),
                None => groups.push(vec![node]),
            }
            continue;
        }
        let top = snapshot.offset_top(node.id());
        if top.is_none() {
            log::warn!(target: "split", "no layout box for word {:?}, keeping it on the current line", node.id());
        }
        let starts_line = match (groups.last(), top, line_top) {
            (None, ..) => true,
            (Some(_), Some(top), Some(current)) => top > current,
            _ => false,
        };
        if starts_line {
            if !groups.is_empty() {
                log::trace!(target: "split", "line {} starts at word {:?}", groups.len(), node.id());
            }
            groups.push(Vec::new());
            line_top = top;
        } else if line_top.is_none() {
            line_top = top;
        }
        if let Some(group) = groups.last_mut() {
            group.push(node);
        }
    }
    groups
}

fn build_lines(
    document: &mut Document,
    groups: Vec<Vec<Node>>,
    options: &SplitOptions,
    lines: &mut Vec<Id>,
) -> Vec<Node> {
    groups
        .into_iter()
        .enumerate()
        .map(|(line_index, group)| {
            let mut line = wrapper(document, &options.class_names.line, options);
            line.set_attr(LINE_INDEX_ATTR, line_index.to_string());
            lines.push(line.id());
            line.with_children(group)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::Rect;

    /// Reports a fixed top for each word, in word order.
    struct ScriptedTops {
        tops: Vec<Option<f32>>,
        calls: usize,
    }

    impl LayoutHost for ScriptedTops {
        fn layout(&mut self, document: &Document, container: Id) -> LayoutSnapshot {
            self.calls += 1;
            let words: Vec<Id> = document
                .get(container)
                .map(|n| n.children().iter().filter(|c| c.is_element()).map(Node::id).collect())
                .unwrap_or_default();
            words
                .into_iter()
                .zip(&self.tops)
                .filter_map(|(id, top)| {
                    top.map(|y| {
                        (
                            id,
                            Rect {
                                y,
                                ..Rect::default()
                            },
                        )
                    })
                })
                .collect()
        }
    }

    fn scripted(tops: &[Option<f32>]) -> ScriptedTops {
        ScriptedTops {
            tops: tops.to_vec(),
            calls: 0,
        }
    }

    fn line_texts(doc: &Document, result: &SplitResult) -> Vec<String> {
        result
            .lines
            .iter()
            .filter_map(|&id| doc.text_content(id))
            .collect()
    }

    fn paragraph(doc: &Document) -> Id {
        doc.root().children()[0].id()
    }

    #[test]
    fn tokens_drop_empty_runs() {
        assert_eq!(word_tokens("  a  b ", " "), vec!["a", "b"]);
        assert_eq!(word_tokens("a | b", " | "), vec!["a", "b"]);
        assert_eq!(word_tokens("no delimiter here", ","), vec!["no delimiter here"]);
        assert_eq!(word_tokens("abc", ""), vec!["abc"]);
        assert!(word_tokens("", "").is_empty());
        assert!(word_tokens(",,,", ",").is_empty());
    }

    #[test]
    fn groups_words_by_measured_top() {
        let mut doc = Document::parse("<p>one two three four</p>");
        let p = paragraph(&doc);
        let mut host = scripted(&[Some(0.0), Some(0.0), Some(24.0), Some(48.0)]);
        let result = split(&mut doc, &mut host, p, &SplitOptions::default()).expect("live element");
        assert_eq!(host.calls, 1);
        assert_eq!(line_texts(&doc, &result), vec!["one two ", "three ", "four"]);
    }

    #[test]
    fn first_word_starts_line_zero_whatever_its_offset() {
        let mut doc = Document::parse("<p>a b</p>");
        let p = paragraph(&doc);
        let mut host = scripted(&[Some(100.0), Some(100.0)]);
        let result = split(&mut doc, &mut host, p, &SplitOptions::default()).expect("live element");
        assert_eq!(result.lines.len(), 1);
    }

    #[test]
    fn a_word_moving_up_does_not_open_a_line() {
        let mut doc = Document::parse("<p>a b c</p>");
        let p = paragraph(&doc);
        let mut host = scripted(&[Some(20.0), Some(0.0), Some(20.0)]);
        let result = split(&mut doc, &mut host, p, &SplitOptions::default()).expect("live element");
        assert_eq!(line_texts(&doc, &result), vec!["a b c"]);
    }

    #[test]
    fn unmeasured_words_stay_on_the_current_line() {
        let mut doc = Document::parse("<p>a b c d</p>");
        let p = paragraph(&doc);
        let mut host = scripted(&[None, Some(0.0), None, Some(20.0)]);
        let result = split(&mut doc, &mut host, p, &SplitOptions::default()).expect("live element");
        assert_eq!(line_texts(&doc, &result), vec!["a b c ", "d"]);
    }

    #[test]
    fn wrappers_carry_indexes_classes_and_display() {
        let mut doc = Document::parse("<p>hi yo</p>");
        let p = paragraph(&doc);
        let result = split(&mut doc, &mut scripted(&[]), p, &SplitOptions::default())
            .expect("live element");

        let word = doc.get(result.words[1]).expect("word committed");
        assert_eq!(word.attr("class"), Some("split-word"));
        assert_eq!(word.attr(WORD_INDEX_ATTR), Some("1"));
        assert_eq!(word.attr("style"), Some("display: inline-block"));

        let ch = doc.get(result.chars[3]).expect("char committed");
        assert_eq!(ch.attr(CHAR_INDEX_ATTR), Some("1"));
        assert_eq!(html::text_content(ch), "o");

        let line = doc.get(result.lines[0]).expect("line committed");
        assert_eq!(line.attr(LINE_INDEX_ATTR), Some("0"));
        assert_eq!(doc.attr(p, LABEL_ATTR), Some("hi yo"));
    }

    #[test]
    fn inline_mode_and_empty_class_names() {
        let mut doc = Document::parse("<p>x</p>");
        let p = paragraph(&doc);
        let mut options = SplitOptions {
            inline: true,
            ..SplitOptions::default()
        };
        options.class_names.word.clear();
        let result = split(&mut doc, &mut scripted(&[]), p, &options).expect("live element");
        let word = doc.get(result.words[0]).expect("word committed");
        assert_eq!(word.attr("class"), None);
        assert_eq!(word.attr("style"), Some("display: inline"));
    }

    #[test]
    fn graphemes_are_not_split() {
        let mut doc = Document::parse("<p>e\u{301}t\u{e9} \u{1F469}\u{200D}\u{1F52C}</p>");
        let p = paragraph(&doc);
        let result = split(&mut doc, &mut scripted(&[]), p, &SplitOptions::default())
            .expect("live element");
        assert_eq!(result.words.len(), 2);
        assert_eq!(result.chars.len(), 4);
    }

    #[test]
    fn detached_or_text_targets_are_not_found() {
        let mut doc = Document::parse("<p>x</p>");
        let text = doc.root().children()[0].children()[0].id();
        let mut host = scripted(&[]);
        for id in [Id(999), text] {
            assert_eq!(
                split(&mut doc, &mut host, id, &SplitOptions::default()),
                Err(SplitError::ElementNotFound)
            );
        }
        assert_eq!(host.calls, 0);
    }
}
