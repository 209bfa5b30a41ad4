//! Single-tag header parser.
//!
//! Consumes one `<...>` header: the name, the attribute list and the
//! self-closing marker. Closing tags come back with their leading `/` intact;
//! the tree builder decides what they mean.
//!
//! Known limitations:
//! - Only a single space separates the name from the first attribute; a tab or
//!   newline becomes part of the name.
//! - Attribute values must be quoted with `'` or `"`; there is no escaping.
//! - Self-closing is recognized at exactly two points: a name ending in `/`
//!   (`<x/>`) and a bare `/` where an attribute key would be (`<x a="1" />`).

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorCode};
use crate::node::Attribute;

const NAME_END: &[u8] = b" >";
const KEY_END: &[u8] = b"=>";
const ATTR_SPACE: &[u8] = b" ";

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TagHeader<'a> {
    pub(crate) name: &'a str,
    pub(crate) attrs: Vec<Attribute>,
    pub(crate) leaf: bool,
}

impl<'a> TagHeader<'a> {
    fn new(name: &'a str, attrs: Vec<Attribute>, leaf: bool) -> Self {
        Self { name, attrs, leaf }
    }

    /// Name without the slash when this is a closing tag.
    pub(crate) fn closing_name(&self) -> Option<&'a str> {
        self.name.strip_prefix('/')
    }
}

/// Parses one tag header. The cursor must sit on the opening `<`; on success
/// it is left just past the closing `>`.
pub(crate) fn parse_tag<'a>(cursor: &mut Cursor<'a>) -> Result<TagHeader<'a>, ParseError> {
    let start = cursor.position();
    let eof = ParseError::new(ParseErrorCode::Incomplete, cursor.end());
    debug_assert_eq!(cursor.peek(), Some(b'<'), "tag parsing starts at '<'");
    cursor.read();

    let raw_name = cursor.read_until(NAME_END).ok_or_else(|| eof.clone())?;
    let terminator = cursor.read();

    let header = if terminator == Some(b'>') {
        match raw_name.strip_suffix('/') {
            Some(name) => TagHeader::new(name, Vec::new(), true),
            None => TagHeader::new(raw_name, Vec::new(), false),
        }
    } else {
        parse_attributes(cursor, raw_name, &eof)?
    };

    if header.name.is_empty() || header.name == "/" {
        return Err(ParseError::new(ParseErrorCode::Incomplete, start));
    }

    #[cfg(any(test, feature = "debug-trace"))]
    log::trace!(target: "markup.element", "tag header at {start}: {header:?}");
    Ok(header)
}

fn parse_attributes<'a>(
    cursor: &mut Cursor<'a>,
    name: &'a str,
    eof: &ParseError,
) -> Result<TagHeader<'a>, ParseError> {
    let mut attrs = Vec::new();
    loop {
        cursor.skip_while(ATTR_SPACE);
        let key = cursor.read_until(KEY_END).ok_or_else(|| eof.clone())?;
        // '=' or '>'
        cursor.read();
        match key {
            "" => return Ok(TagHeader::new(name, attrs, false)),
            "/" => return Ok(TagHeader::new(name, attrs, true)),
            _ => {}
        }

        let quote_at = cursor.position();
        let quote = match cursor.read() {
            Some(q @ (b'"' | b'\'')) => q,
            Some(_) => return Err(ParseError::new(ParseErrorCode::Incomplete, quote_at)),
            None => return Err(eof.clone()),
        };
        let value = cursor.read_until(&[quote]).ok_or_else(|| eof.clone())?;
        cursor.read();
        attrs.push(Attribute::new(key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(input: &str) -> Result<TagHeader<'_>, ParseError> {
        parse_tag(&mut Cursor::new(input))
    }

    fn attrs(pairs: &[(&str, &str)]) -> Vec<Attribute> {
        pairs.iter().map(|&(k, v)| Attribute::new(k, v)).collect()
    }

    #[test]
    fn bare_open_tag() {
        let header = tag("<node>").expect("parses");
        assert_eq!(header, TagHeader::new("node", Vec::new(), false));
        assert_eq!(header.closing_name(), None);
    }

    #[test]
    fn trailing_slash_in_name_marks_leaf() {
        assert_eq!(
            tag("<node/>").expect("parses"),
            TagHeader::new("node", Vec::new(), true)
        );
    }

    #[test]
    fn closing_tag_keeps_slash() {
        let header = tag("</node>").expect("parses");
        assert_eq!(header.name, "/node");
        assert_eq!(header.closing_name(), Some("node"));
    }

    #[test]
    fn both_quote_styles_are_accepted() {
        let header = tag(r#"<node attr1='value1' attr2="value2"/>"#).expect("parses");
        assert_eq!(
            header,
            TagHeader::new(
                "node",
                attrs(&[("attr1", "value1"), ("attr2", "value2")]),
                true
            )
        );
    }

    #[test]
    fn spaced_slash_key_marks_leaf() {
        let header = tag(r#"<node a="1" />"#).expect("parses");
        assert!(header.leaf);
        assert_eq!(header.attrs, attrs(&[("a", "1")]));
    }

    #[test]
    fn space_before_close_is_not_leaf() {
        let header = tag(r#"<node a="1" >"#).expect("parses");
        assert!(!header.leaf);
        let header = tag("<node >").expect("parses");
        assert_eq!(header, TagHeader::new("node", Vec::new(), false));
    }

    #[test]
    fn values_keep_other_quote_and_angle_brackets() {
        let header = tag(r#"<n a='say "hi"' b="1 > 0">"#).expect("parses");
        assert_eq!(header.attrs, attrs(&[("a", r#"say "hi""#), ("b", "1 > 0")]));
    }

    #[test]
    fn duplicate_keys_are_kept_in_order() {
        let header = tag(r#"<n k="1" k="2">"#).expect("parses");
        assert_eq!(header.attrs, attrs(&[("k", "1"), ("k", "2")]));
    }

    #[test]
    fn cursor_stops_after_header() {
        let mut cursor = Cursor::new("<a x=\"1\">rest");
        parse_tag(&mut cursor).expect("parses");
        assert_eq!(cursor.peek(), Some(b'r'));
    }

    #[test]
    fn truncated_name_is_incomplete() {
        let err = tag("<node").expect_err("truncated");
        assert_eq!(err.code, ParseErrorCode::Incomplete);
        assert_eq!(err.position, 5);
    }

    #[test]
    fn truncated_key_or_value_is_incomplete() {
        for input in [r#"<node a"#, r#"<node a="#, r#"<node a="v"#, r#"<node a="v" "#] {
            let err = tag(input).expect_err(input);
            assert_eq!(err.code, ParseErrorCode::Incomplete, "input: {input}");
            assert_eq!(err.position, input.len(), "input: {input}");
        }
    }

    #[test]
    fn unquoted_value_is_rejected() {
        let err = tag("<node a=v>").expect_err("unquoted");
        assert_eq!(err.code, ParseErrorCode::Incomplete);
        assert_eq!(err.position, 8);
    }

    #[test]
    fn empty_name_is_rejected() {
        for input in ["<>", "</>", "< a='1'>"] {
            let err = tag(input).expect_err(input);
            assert_eq!(err.code, ParseErrorCode::Incomplete, "input: {input}");
            assert_eq!(err.position, 0, "input: {input}");
        }
    }
}
