use crate::types::{Id, Node, Token};

/// Builds a document tree from a token list.
///
/// End tags close the nearest open element with the same name; unmatched end tags are
/// ignored and anything still open at the end is closed implicitly. All nodes come out with
/// `Id::UNSET`; [`crate::Document`] assigns ids.
pub fn build_dom(tokens: &[Token]) -> Node {
    // open[0] is the document; every other entry is an element still accepting children.
    let mut open: Vec<Node> = vec![Node::Document {
        id: Id::UNSET,
        doctype: None,
        children: Vec::new(),
    }];

    for token in tokens {
        match token {
            Token::Doctype(dt) => {
                if let Some(Node::Document { doctype, .. }) = open.first_mut() {
                    *doctype = Some(dt.clone());
                }
            }
            Token::Comment(text) => append(
                &mut open,
                Node::Comment {
                    id: Id::UNSET,
                    text: text.clone(),
                },
            ),
            Token::Text(text) => {
                if !text.is_empty() {
                    append(&mut open, Node::text(Id::UNSET, text.clone()));
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Node::Element {
                    id: Id::UNSET,
                    name: name.clone(),
                    attributes: attributes.clone(),
                    children: Vec::new(),
                };
                if *self_closing {
                    append(&mut open, element);
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                let Some(depth) = open
                    .iter()
                    .rposition(|n| n.name().is_some_and(|n| n == &**name))
                else {
                    continue;
                };
                while open.len() > depth {
                    close_top(&mut open);
                }
            }
        }
    }

    while open.len() > 1 {
        close_top(&mut open);
    }
    open.pop().unwrap_or(Node::Document {
        id: Id::UNSET,
        doctype: None,
        children: Vec::new(),
    })
}

fn append(open: &mut [Node], node: Node) {
    if let Some(parent) = open.last_mut() {
        parent.push_child(node);
    }
}

fn close_top(open: &mut Vec<Node>) {
    if open.len() <= 1 {
        return;
    }
    if let Some(done) = open.pop() {
        append(open, done);
    }
}

#[cfg(test)]
mod tests {
    use super::build_dom;
    use crate::tokenizer::tokenize;
    use crate::types::Node;

    fn shape(node: &Node) -> String {
        match node {
            Node::Document { children, .. } | Node::Element { children, .. } => {
                let inner: Vec<String> = children.iter().map(shape).collect();
                format!("{}({})", node.name().unwrap_or("#doc"), inner.join(","))
            }
            Node::Text { text, .. } => format!("{text:?}"),
            Node::Comment { .. } => "#c".to_string(),
        }
    }

    #[test]
    fn builds_nested_tree() {
        let dom = build_dom(&tokenize("<div><p>a</p><p>b<em>c</em></p></div>"));
        assert_eq!(shape(&dom), r#"#doc(div(p("a"),p("b",em("c"))))"#);
    }

    #[test]
    fn unmatched_end_tags_are_ignored_and_open_tags_close_at_eof() {
        let dom = build_dom(&tokenize("</span><div><p>open"));
        assert_eq!(shape(&dom), r#"#doc(div(p("open")))"#);
    }

    #[test]
    fn end_tag_closes_intermediate_elements() {
        let dom = build_dom(&tokenize("<div><b>x</div>y"));
        assert_eq!(shape(&dom), r#"#doc(div(b("x")),"y")"#);
    }

    #[test]
    fn doctype_is_recorded() {
        let dom = build_dom(&tokenize("<!doctype html><p></p>"));
        let Node::Document { doctype, .. } = &dom else {
            panic!("root must be a document");
        };
        assert_eq!(doctype.as_deref(), Some("doctype html"));
    }
}
