//! Parser and serializer for a small tag/attribute markup dialect.
//!
//! The dialect has elements, quoted attributes, self-closing tags and plain
//! text. There are no entities, comments, CDATA, doctypes or namespaces.
//!
//! ```
//! let root = markup::parse(r#"<config><entry key='a'>1</entry></config>"#).unwrap();
//! let entry = root.find_first_child(&["entry"]).unwrap();
//! assert_eq!(entry.find_attr("key"), Some("a"));
//! assert_eq!(markup::deparse(&root), r#"<config><entry key="a">1</entry></config>"#);
//! ```

pub mod debug;
pub mod perf_fixtures;
#[cfg(any(test, feature = "snapshot"))]
pub mod snapshot;

mod builder;
mod cursor;
mod deparse;
mod element;
mod error;
mod node;

pub use crate::builder::{Parser, ParserConfig, parse};
pub use crate::deparse::{deparse, deparse_into};
pub use crate::error::{ParseError, ParseErrorCode};
pub use crate::node::{AttrQuery, Attribute, Node};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn public_types_are_thread_safe() {
        assert_send_sync::<Node>();
        assert_send_sync::<ParseError>();
        assert_send_sync::<Parser>();
    }

    #[test]
    fn parses_on_separate_threads() {
        let inputs = ["<a><b/></a>", "<x k='v'>t</x>", "<a>"];
        let handles: Vec<_> = inputs
            .iter()
            .map(|&input| std::thread::spawn(move || parse(input)))
            .collect();
        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("parser thread panicked"))
            .collect();
        assert_eq!(results[0].as_ref().map(Node::name), Ok("a"));
        assert_eq!(results[1].as_ref().map(|n| n.data()), Ok("t"));
        assert_eq!(
            results[2].as_ref().map_err(|e| e.code),
            Err(ParseErrorCode::Incomplete)
        );
    }

    #[test]
    fn perf_fixtures_parse() {
        let root = parse(&perf_fixtures::make_blocks(3)).expect("blocks parse");
        assert_eq!(root.children().len(), 3);
        assert!(root.children()[0].find_first_child(&["icon"]).is_some_and(Node::is_leaf));

        let nested = parse(&perf_fixtures::make_nested(4)).expect("nested parses");
        let path = ["n", "n", "n"];
        assert_eq!(nested.find_first_child(&path).map(Node::data), Some("leaf"));
    }
}
