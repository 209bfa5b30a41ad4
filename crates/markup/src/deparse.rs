//! Serializer: node tree back to markup text.
//!
//! Output is raw: attribute values are always wrapped in double quotes and
//! neither values nor text data are escaped. A value containing `"` or a text
//! run containing `<` therefore does not survive a reparse unchanged.

use crate::node::Node;
use std::fmt;

pub fn deparse(node: &Node) -> String {
    let mut out = String::new();
    deparse_into(&mut out, node);
    out
}

/// Appends the serialized form of `node` to `out`.
pub fn deparse_into(out: &mut String, node: &Node) {
    out.push('<');
    out.push_str(node.name());
    for attr in node.attrs() {
        out.push(' ');
        out.push_str(&attr.key);
        out.push_str("=\"");
        out.push_str(&attr.value);
        out.push('"');
    }
    if node.is_leaf() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    out.push_str(node.data());
    for child in node.children() {
        deparse_into(out, child);
    }
    out.push_str("</");
    out.push_str(node.name());
    out.push('>');
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&deparse(self))
    }
}
