use std::fmt;

// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

/// One simple selector inside a compound selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
    /// `[name]` or `[name=value]`
    Attribute { name: String, value: Option<String> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// `div.note#main`: every simple selector must match the same element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundSelector {
    pub parts: Vec<Selector>,
}

/// Compound selectors joined by combinators, e.g. `main > p.lead span`.
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Comma-separated group: matches when any member matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorParseError {
    pub selector: String,
    pub reason: &'static str,
}

impl fmt::Display for SelectorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector `{}`: {}", self.selector, self.reason)
    }
}

impl std::error::Error for SelectorParseError {}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

// input: "main > p.lead, #intro span[data-x=1]"
// output: SelectorList with two ComplexSelectors
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorParseError> {
    let err = |reason| SelectorParseError {
        selector: input.to_string(),
        reason,
    };
    let mut selectors = Vec::new();
    for group in input.split(',') {
        let group = group.trim();
        if group.is_empty() {
            return Err(err("empty selector in group"));
        }
        selectors.push(parse_complex(group).map_err(err)?);
    }
    Ok(SelectorList { selectors })
}

fn parse_complex(input: &str) -> Result<ComplexSelector, &'static str> {
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    let mut pending: Option<Combinator> = None;
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            if !compounds.is_empty() && pending.is_none() {
                pending = Some(Combinator::Descendant);
            }
            continue;
        }
        if c == '>' {
            chars.next();
            if compounds.is_empty() || pending == Some(Combinator::Child) {
                return Err("dangling `>` combinator");
            }
            pending = Some(Combinator::Child);
            continue;
        }

        let mut end = start;
        let mut in_brackets = false;
        while let Some(&(i, ch)) = chars.peek() {
            if !in_brackets && (ch.is_whitespace() || ch == '>') {
                break;
            }
            if ch == '[' {
                in_brackets = true;
            } else if ch == ']' {
                in_brackets = false;
            }
            end = i + ch.len_utf8();
            chars.next();
        }
        if in_brackets {
            return Err("unterminated attribute selector");
        }
        if !compounds.is_empty() {
            combinators.push(pending.take().unwrap_or(Combinator::Descendant));
        }
        compounds.push(parse_compound(&input[start..end])?);
    }

    if pending == Some(Combinator::Child) {
        return Err("dangling `>` combinator");
    }
    if compounds.is_empty() {
        return Err("empty selector");
    }
    Ok(ComplexSelector {
        compounds,
        combinators,
    })
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(s.len(), |(i, _)| i);
    s.split_at(end)
}

// input: "p.lead#intro[hidden]"
fn parse_compound(mut s: &str) -> Result<CompoundSelector, &'static str> {
    let mut parts = Vec::new();

    if let Some(rest) = s.strip_prefix('*') {
        parts.push(Selector::Universal);
        s = rest;
    } else {
        let (name, rest) = take_ident(s);
        if !name.is_empty() {
            parts.push(Selector::Type(name.to_ascii_lowercase()));
            s = rest;
        }
    }

    while let Some(c) = s.chars().next() {
        match c {
            '#' | '.' => {
                let (name, rest) = take_ident(&s[1..]);
                if name.is_empty() {
                    return Err("expected a name after `#` or `.`");
                }
                parts.push(if c == '#' {
                    Selector::Id(name.to_string())
                } else {
                    Selector::Class(name.to_string())
                });
                s = rest;
            }
            '[' => {
                let close = s.find(']').ok_or("unterminated attribute selector")?;
                parts.push(parse_attribute(&s[1..close])?);
                s = &s[close + 1..];
            }
            _ => return Err("unsupported selector syntax"),
        }
    }

    if parts.is_empty() {
        return Err("empty compound selector");
    }
    Ok(CompoundSelector { parts })
}

// input: `data-x`, `data-x=1`, `title="a b"`
fn parse_attribute(inner: &str) -> Result<Selector, &'static str> {
    let (name, value) = match inner.split_once('=') {
        Some((n, v)) => {
            let v = v.trim();
            let unquoted = v
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(v);
            (n.trim(), Some(unquoted.to_string()))
        }
        None => (inner.trim(), None),
    };
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err("invalid attribute name");
    }
    Ok(Selector::Attribute {
        name: name.to_ascii_lowercase(),
        value,
    })
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compound_and_combinators() {
        let list = parse_selector_list("main > p.lead span, #intro").expect("valid");
        assert_eq!(list.selectors.len(), 2);
        let first = &list.selectors[0];
        assert_eq!(
            first.combinators,
            vec![Combinator::Child, Combinator::Descendant]
        );
        assert_eq!(
            first.compounds[1].parts,
            vec![Selector::Type("p".into()), Selector::Class("lead".into())]
        );
        assert_eq!(
            list.selectors[1].compounds[0].parts,
            vec![Selector::Id("intro".into())]
        );
    }

    #[test]
    fn parses_attribute_selectors() {
        let list = parse_selector_list(r#"span[data-word-index="0"][hidden]"#).expect("valid");
        assert_eq!(
            list.selectors[0].compounds[0].parts,
            vec![
                Selector::Type("span".into()),
                Selector::Attribute {
                    name: "data-word-index".into(),
                    value: Some("0".into())
                },
                Selector::Attribute {
                    name: "hidden".into(),
                    value: None
                },
            ]
        );
    }

    #[test]
    fn attribute_values_may_contain_spaces() {
        let list = parse_selector_list(r#"p[title="a b"] em"#).expect("valid");
        assert_eq!(list.selectors[0].compounds.len(), 2);
    }

    #[test]
    fn rejects_malformed_selectors() {
        for bad in ["", " , p", "p >", "> p", "p > > a", "p.", "#", "p[", "p:hover", "[=x]"] {
            let err = parse_selector_list(bad).expect_err(bad);
            assert_eq!(err.selector, bad);
        }
    }

    #[test]
    fn declarations_lowercase_names() {
        let decls = parse_declarations("Display: inline-block; ; color:red");
        assert_eq!(
            decls,
            vec![
                Declaration {
                    name: "display".into(),
                    value: "inline-block".into()
                },
                Declaration {
                    name: "color".into(),
                    value: "red".into()
                },
            ]
        );
    }
}
