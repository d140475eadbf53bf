/// Decode the small, fixed subset of HTML character references the tokenizer understands.
///
/// Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
/// Numeric: `&#NNN;` and `&#xHHHH;`, only when semicolon-terminated and a valid scalar value.
/// Anything else is copied through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    const NAMED: &[(&str, char)] = &[
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&apos;", '\''),
        ("&nbsp;", '\u{00A0}'),
    ];
    // 0x10FFFF / 1114111
    const MAX_HEX_DIGITS: usize = 6;
    const MAX_DEC_DIGITS: usize = 7;

    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = memchr::memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        if let Some((pat, ch)) = NAMED.iter().find(|(pat, _)| rest.starts_with(pat)) {
            out.push(*ch);
            rest = &rest[pat.len()..];
            continue;
        }

        let numeric = rest
            .strip_prefix("&#x")
            .or_else(|| rest.strip_prefix("&#X"))
            .map(|digits| (digits, 16, MAX_HEX_DIGITS))
            .or_else(|| rest.strip_prefix("&#").map(|digits| (digits, 10, MAX_DEC_DIGITS)));

        if let Some((digits, radix, max_digits)) = numeric
            && let Some(end) = digits.find(';')
            && end > 0
            && end <= max_digits
            && let Some(ch) = u32::from_str_radix(&digits[..end], radix)
                .ok()
                .and_then(char::from_u32)
        {
            out.push(ch);
            let consumed = rest.len() - digits.len() + end + 1;
            rest = &rest[consumed..];
            continue;
        }

        out.push('&');
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::decode_entities;

    #[test]
    fn passes_utf8_through() {
        assert_eq!(decode_entities("120×32 🍕"), "120×32 🍕");
    }

    #[test]
    fn decodes_named_and_numeric() {
        assert_eq!(decode_entities("a &amp; b&lt;c&gt;"), "a & b<c>");
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("x&nbsp;y"), "x\u{00A0}y");
    }

    #[test]
    fn leaves_malformed_references_alone() {
        assert_eq!(decode_entities("&unknown; & &#;"), "&unknown; & &#;");
        assert_eq!(decode_entities("&#x110000;"), "&#x110000;");
        assert_eq!(decode_entities("&#12345678;"), "&#12345678;");
        assert_eq!(decode_entities("&amp"), "&amp");
    }
}
