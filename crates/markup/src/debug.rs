use crate::Node;

#[derive(Clone, Copy, Debug, Default)]
pub struct DumpOptions {
    /// Emit `.attrs` / `.children` blocks even when empty. Applies to the
    /// node being dumped, not to its descendants.
    pub print_empty_fields: bool,
}

/// Field-by-field dump of a tree, one line per entry, every line starting
/// with `prefix`:
///
/// ```text
/// .name = "a",
/// .data = "",
/// .children = {
///   Node{
///     .name = "b",
///     .data = "text",
///   },
/// },
/// ```
pub fn dump_node(node: &Node, prefix: &str, options: DumpOptions) -> Vec<String> {
    struct IndentGuard<'a> {
        indent: &'a mut String,
        step: usize,
    }

    impl<'a> IndentGuard<'a> {
        fn push(indent: &'a mut String, step: &str) -> Self {
            indent.push_str(step);
            Self {
                indent,
                step: step.len(),
            }
        }
    }

    impl Drop for IndentGuard<'_> {
        fn drop(&mut self) {
            let new_len = self.indent.len() - self.step;
            self.indent.truncate(new_len);
        }
    }

    const INDENT_STEP: &str = "  ";
    const NESTED_STEP: &str = "    ";

    fn line(indent: &str, parts: &[&str]) -> String {
        let mut out = String::with_capacity(indent.len() + 32);
        out.push_str(indent);
        for part in parts {
            out.push_str(part);
        }
        out
    }

    fn walk(node: &Node, indent: &mut String, print_empty: bool, out: &mut Vec<String>) {
        out.push(line(indent, &[".name = \"", node.name(), "\","]));
        out.push(line(indent, &[".data = \"", node.data(), "\","]));

        if print_empty || !node.attrs().is_empty() {
            out.push(line(indent, &[".attrs = {"]));
            for attr in node.attrs() {
                out.push(line(
                    indent,
                    &[INDENT_STEP, "{\"", attr.key.as_str(), "\", \"", attr.value.as_str(), "\"},"],
                ));
            }
            out.push(line(indent, &["},"]));
        }

        if print_empty || !node.children().is_empty() {
            out.push(line(indent, &[".children = {"]));
            for child in node.children() {
                out.push(line(indent, &[INDENT_STEP, "Node{"]));
                {
                    let mut guard = IndentGuard::push(indent, NESTED_STEP);
                    walk(child, &mut *guard.indent, false, out);
                }
                out.push(line(indent, &[INDENT_STEP, "},"]));
            }
            out.push(line(indent, &["},"]));
        }
    }

    let mut out = Vec::new();
    let mut indent = prefix.to_string();
    walk(node, &mut indent, options.print_empty_fields, &mut out);
    out
}
