//! Forgiving HTML fragment tokenizer.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are lowercased.
//! `<script>` and `<style>` bodies are emitted verbatim as a single text token.
//! There is no HTML5 error recovery: stray `<` that does not start a tag is kept as text.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;
use std::sync::Arc;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

pub(crate) fn is_rawtext_element(name: &str) -> bool {
    name == "script" || name == "style"
}

#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

/// Byte cursor over the input. Every position it stops at is either the end of input or
/// sits right before/after an ASCII byte, so all slices stay on UTF-8 boundaries.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn take_name(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_name_byte) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn skip_past(&mut self, byte: u8) {
        match memchr(byte, &self.bytes()[self.pos..]) {
            Some(rel) => self.pos += rel + 1,
            None => self.pos = self.input.len(),
        }
    }
}

/// Tokenizes `input` into a flat token list.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut cur = Cursor { input, pos: 0 };

    while !cur.at_end() {
        let rest = cur.rest();
        let Some(lt) = memchr(b'<', rest.as_bytes()) else {
            push_text(&mut out, rest);
            break;
        };
        if lt > 0 {
            push_text(&mut out, &rest[..lt]);
            cur.pos += lt;
            continue;
        }

        if rest.starts_with(COMMENT_START) {
            let body = &rest[COMMENT_START.len()..];
            match body.find(COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(body[..end].to_string()));
                    cur.pos += COMMENT_START.len() + end + COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(body.to_string()));
                    cur.pos = input.len();
                }
            }
            continue;
        }

        if rest.len() >= 9 && rest.as_bytes()[..9].eq_ignore_ascii_case(b"<!doctype") {
            let body = &rest[2..];
            let end = body.find('>').unwrap_or(body.len());
            out.push(Token::Doctype(body[..end].trim().to_string()));
            cur.pos += 2 + end + 1;
            continue;
        }

        if rest.as_bytes().get(1) == Some(&b'/') {
            cur.pos += 2;
            let name = cur.take_name().to_ascii_lowercase();
            cur.skip_past(b'>');
            if !name.is_empty() {
                out.push(Token::EndTag(Arc::from(name)));
            }
            continue;
        }

        if !rest.as_bytes().get(1).is_some_and(|b| b.is_ascii_alphabetic()) {
            // Not a tag opener; keep the '<' as text.
            push_text(&mut out, "<");
            cur.pos += 1;
            continue;
        }

        cur.pos += 1;
        let name: Arc<str> = Arc::from(cur.take_name().to_ascii_lowercase());
        let (attributes, mut self_closing) = read_attributes(&mut cur);
        if is_void_element(&name) {
            self_closing = true;
        }
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if is_rawtext_element(&name) && !self_closing {
            let (body, consumed) = read_rawtext(cur.rest(), &name);
            if !body.is_empty() {
                out.push(Token::Text(body.to_string()));
            }
            out.push(Token::EndTag(name));
            cur.pos += consumed;
        }
    }

    out
}

fn push_text(out: &mut Vec<Token>, raw: &str) {
    let decoded = decode_entities(raw);
    if decoded.is_empty() {
        return;
    }
    // Adjacent text (e.g. after a stray '<') merges into one node.
    if let Some(Token::Text(prev)) = out.last_mut() {
        prev.push_str(&decoded);
    } else {
        out.push(Token::Text(decoded));
    }
}

fn read_attributes(cur: &mut Cursor<'_>) -> (Vec<(Arc<str>, Option<String>)>, bool) {
    let mut attributes: Vec<(Arc<str>, Option<String>)> = Vec::new();
    loop {
        cur.skip_ws();
        match cur.peek() {
            None => return (attributes, false),
            Some(b'>') => {
                cur.pos += 1;
                return (attributes, false);
            }
            Some(b'/') => {
                cur.pos += 1;
                if cur.peek() == Some(b'>') {
                    cur.pos += 1;
                    return (attributes, true);
                }
                continue;
            }
            _ => {}
        }

        let name = cur.take_name();
        if name.is_empty() {
            // Unknown byte in tag soup; skip one whole char.
            let step = cur.rest().chars().next().map_or(1, char::len_utf8);
            cur.pos += step;
            continue;
        }
        let name: Arc<str> = Arc::from(name.to_ascii_lowercase());

        cur.skip_ws();
        let value = if cur.peek() == Some(b'=') {
            cur.pos += 1;
            cur.skip_ws();
            Some(read_attribute_value(cur))
        } else {
            None
        };
        if !attributes.iter().any(|(k, _)| *k == name) {
            attributes.push((name, value));
        }
    }
}

fn read_attribute_value(cur: &mut Cursor<'_>) -> String {
    match cur.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cur.pos += 1;
            let start = cur.pos;
            let end = memchr(quote, &cur.bytes()[start..]).map_or(cur.input.len(), |rel| start + rel);
            let raw = &cur.input[start..end];
            cur.pos = (end + 1).min(cur.input.len());
            decode_entities(raw)
        }
        _ => {
            let start = cur.pos;
            while let Some(b) = cur.peek() {
                if b.is_ascii_whitespace() || b == b'>' {
                    break;
                }
                if b == b'/' && cur.bytes().get(cur.pos + 1) == Some(&b'>') {
                    break;
                }
                cur.pos += 1;
            }
            decode_entities(&cur.input[start..cur.pos])
        }
    }
}

/// Returns the raw body up to the matching close tag and the number of bytes consumed,
/// including the close tag. A missing close tag swallows the remainder.
fn read_rawtext<'a>(rest: &'a str, name: &str) -> (&'a str, usize) {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &bytes[i..]) {
        let at = i + rel;
        let tag_end = at + 2 + name.len();
        if bytes.get(at + 1) == Some(&b'/')
            && bytes.len() >= tag_end
            && bytes[at + 2..tag_end].eq_ignore_ascii_case(name.as_bytes())
        {
            let mut k = tag_end;
            while bytes.get(k).is_some_and(|b| b.is_ascii_whitespace()) {
                k += 1;
            }
            if bytes.get(k) == Some(&b'>') {
                return (&rest[..at], k + 1);
            }
        }
        i = at + 1;
    }
    (rest, rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| match t {
                Token::Doctype(d) => format!("!{d}"),
                Token::StartTag { name, self_closing, .. } => {
                    format!("<{name}{}>", if *self_closing { "/" } else { "" })
                }
                Token::EndTag(name) => format!("</{name}>"),
                Token::Comment(c) => format!("<!--{c}-->"),
                Token::Text(t) => format!("{t:?}"),
            })
            .collect()
    }

    #[test]
    fn tokenizes_nested_tags_and_text() {
        let tokens = tokenize("<div id=a><P class='x y'>Hello <b>world</b></p></div>");
        assert_eq!(
            names(&tokens),
            vec![
                "<div>", "<p>", "\"Hello \"", "<b>", "\"world\"", "</b>", "</p>", "</div>"
            ]
        );
        let Token::StartTag { attributes, .. } = &tokens[1] else {
            panic!("expected start tag, got {:?}", tokens[1]);
        };
        assert_eq!(&*attributes[0].0, "class");
        assert_eq!(attributes[0].1.as_deref(), Some("x y"));
    }

    #[test]
    fn keeps_utf8_text_and_decodes_entities() {
        let tokens = tokenize("<p>caf&eacute; é 🍕 &amp; more</p>");
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "caf&eacute; é 🍕 & more")),
            "got {tokens:?}"
        );
    }

    #[test]
    fn void_and_self_closing_elements_do_not_open() {
        let tokens = tokenize("a<br>b<span/>c");
        assert_eq!(names(&tokens), vec!["\"a\"", "<br/>", "\"b\"", "<span/>", "\"c\""]);
    }

    #[test]
    fn script_body_is_raw() {
        let tokens = tokenize("<script>if (a < b) {}</SCRIPT >tail");
        assert_eq!(
            names(&tokens),
            vec!["<script>", "\"if (a < b) {}\"", "</script>", "\"tail\""]
        );
    }

    #[test]
    fn doctype_and_comments() {
        let tokens = tokenize("<!DOCTYPE html><!-- note --><p>x</p><!-- open");
        assert_eq!(
            names(&tokens),
            vec!["!DOCTYPE html", "<!-- note -->", "<p>", "\"x\"", "</p>", "<!-- open-->"]
        );
    }

    #[test]
    fn stray_less_than_stays_text() {
        let tokens = tokenize("1 < 2 <3");
        assert_eq!(names(&tokens), vec!["\"1 < 2 <3\""]);
    }

    #[test]
    fn duplicate_attributes_keep_first() {
        let tokens = tokenize(r#"<span class="a" class="b" hidden>"#);
        let Token::StartTag { attributes, .. } = &tokens[0] else {
            panic!("expected start tag");
        };
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].1.as_deref(), Some("a"));
        assert_eq!(attributes[1], (Arc::from("hidden"), None));
    }
}
