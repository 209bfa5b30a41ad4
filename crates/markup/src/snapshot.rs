use crate::Node;
use std::fmt::{self, Write};
use std::sync::OnceLock;

/// Deterministic tree rendering and comparison for tests.
/// Not a stable public format.
///
/// One line per node, indented two spaces per level:
/// `<name key="value" ...>` followed by ` "data"` when data is non-empty.
/// Control characters, quotes, backslashes and non-ASCII are escaped so the
/// lines are safe to diff.
///
/// Equivalence rules match `Node`'s `PartialEq`: names, data, attributes in
/// order, children in order.
#[derive(Debug)]
pub struct TreeSnapshot {
    lines: Vec<String>,
}

impl TreeSnapshot {
    pub fn new(root: &Node) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for TreeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct TreeMismatch<'a> {
    path: String,
    detail: String,
    expected: String,
    actual: String,
    expected_node: &'a Node,
    actual_node: &'a Node,
    expected_subtree: OnceLock<String>,
    actual_subtree: OnceLock<String>,
}

impl TreeMismatch<'_> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for TreeMismatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected_subtree = self
            .expected_subtree
            .get_or_init(|| TreeSnapshot::new(self.expected_node).render());
        let actual_subtree = self
            .actual_subtree
            .get_or_init(|| TreeSnapshot::new(self.actual_node).render());
        writeln!(f, "tree mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected: {}", self.expected)?;
        writeln!(f, "actual:   {}", self.actual)?;
        writeln!(f, "expected subtree:\n{}", expected_subtree)?;
        writeln!(f, "actual subtree:\n{}", actual_subtree)?;
        Ok(())
    }
}

impl std::error::Error for TreeMismatch<'_> {}

pub fn assert_tree_eq(expected: &Node, actual: &Node) {
    if let Err(mismatch) = compare_trees(expected, actual) {
        panic!("{mismatch}");
    }
}

pub fn compare_trees<'a>(
    expected: &'a Node,
    actual: &'a Node,
) -> Result<(), Box<TreeMismatch<'a>>> {
    let mut path = vec![expected.name().to_string()];
    compare_nodes(expected, actual, &mut path)
}

fn compare_nodes<'a>(
    expected: &'a Node,
    actual: &'a Node,
    path: &mut Vec<String>,
) -> Result<(), Box<TreeMismatch<'a>>> {
    if expected.name() != actual.name() {
        return Err(Box::new(mismatch(path, "name", expected, actual)));
    }
    if expected.data() != actual.data() {
        return Err(Box::new(mismatch(path, "data", expected, actual)));
    }
    let (expected_attrs, actual_attrs) = (expected.attrs(), actual.attrs());
    if expected_attrs.len() != actual_attrs.len() {
        return Err(Box::new(mismatch(
            path,
            &format!(
                "attribute count (expected {}, actual {})",
                expected_attrs.len(),
                actual_attrs.len()
            ),
            expected,
            actual,
        )));
    }
    for (i, (exp, act)) in expected_attrs.iter().zip(actual_attrs).enumerate() {
        if exp.key != act.key {
            return Err(Box::new(mismatch(
                path,
                &format!("attribute key at index {i}"),
                expected,
                actual,
            )));
        }
        if exp.value != act.value {
            return Err(Box::new(mismatch(
                path,
                &format!("attribute value at index {i}"),
                expected,
                actual,
            )));
        }
    }

    let (expected_children, actual_children) = (expected.children(), actual.children());
    if expected_children.len() != actual_children.len() {
        return Err(Box::new(mismatch(
            path,
            &format!(
                "child count (expected {}, actual {})",
                expected_children.len(),
                actual_children.len()
            ),
            expected,
            actual,
        )));
    }
    for (idx, (exp, act)) in expected_children.iter().zip(actual_children).enumerate() {
        path.push(format!("{}[{}]", exp.name(), idx));
        let result = compare_nodes(exp, act, path);
        path.pop();
        result?;
    }
    Ok(())
}

fn mismatch<'a>(
    path: &[String],
    detail: &str,
    expected: &'a Node,
    actual: &'a Node,
) -> TreeMismatch<'a> {
    TreeMismatch {
        path: format!("/{}", path.join("/")),
        detail: detail.to_string(),
        expected: truncate_line(format_node_line(expected), 160),
        actual: truncate_line(format_node_line(actual), 160),
        expected_node: expected,
        actual_node: actual,
        expected_subtree: OnceLock::new(),
        actual_subtree: OnceLock::new(),
    }
}

fn truncate_line(mut line: String, max_len: usize) -> String {
    if line.len() > max_len {
        let mut cut = max_len.saturating_sub(3);
        while !line.is_char_boundary(cut) {
            cut -= 1;
        }
        line.truncate(cut);
        line.push_str("...");
    }
    line
}

fn walk_snapshot(node: &Node, depth: usize, out: &mut Vec<String>) {
    const INDENT_STEP: usize = 2;
    let mut line = " ".repeat(depth.saturating_mul(INDENT_STEP));
    write_node_line(&mut line, node);
    out.push(line);
    for child in node.children() {
        walk_snapshot(child, depth + 1, out);
    }
}

fn format_node_line(node: &Node) -> String {
    let mut line = String::new();
    write_node_line(&mut line, node);
    line
}

fn write_node_line(out: &mut String, node: &Node) {
    out.push('<');
    write_escaped(out, node.name());
    for attr in node.attrs() {
        out.push(' ');
        write_escaped(out, &attr.key);
        out.push_str("=\"");
        write_escaped(out, &attr.value);
        out.push('"');
    }
    out.push('>');
    if !node.data().is_empty() {
        out.push_str(" \"");
        write_escaped(out, node.data());
        out.push('"');
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ if ch.is_ascii() && !ch.is_ascii_control() => out.push(ch),
            _ => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
        }
    }
}
