//! Stack-based tree builder.
//!
//! Nodes live in an index-addressed arena while the tree grows, so the stack
//! of open elements holds plain indices that stay valid as siblings and
//! children are appended. The owned `Node` tree is materialized once the whole
//! input has been accepted.
//!
//! Every text run replaces the `data` of the element it appears in. With
//! `<a>x<b/>y</a>` only `y` survives on `a`; text is never concatenated or
//! interleaved with children.

use crate::cursor::Cursor;
use crate::element::parse_tag;
use crate::error::{ParseError, ParseErrorCode};
use crate::node::{Attribute, Node};
use memchr::memchr_iter;

#[derive(Clone, Debug, Default)]
pub struct ParserConfig {
    /// Initial arena capacity in nodes. `None` sizes the arena from the number
    /// of `<` bytes in the input, which bounds the node count.
    pub node_capacity: Option<usize>,
}

/// Reusable parser handle. Holds configuration only; every call to
/// [`Parser::parse`] is independent.
#[derive(Clone, Debug, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, input: &str) -> Result<Node, ParseError> {
        let start = input.len() - input.trim_start().len();
        let end = input.trim_end().len();
        if start >= end || input.as_bytes()[start] != b'<' {
            return Err(ParseError::new(ParseErrorCode::NotMarkup, start));
        }
        let body = &input[..end];
        let capacity = match self.config.node_capacity {
            Some(capacity) => capacity,
            None => memchr_iter(b'<', &body.as_bytes()[start..]).count(),
        };

        let mut arena = NodeArena::with_capacity(capacity + 1);
        // Synthetic root: bottom of the stack, never handed out.
        let root = arena.push(ArenaNode::new("", Vec::new()));
        let mut open_elements: Vec<usize> = Vec::new();
        let mut cursor = Cursor::starting_at(body, start);

        while !cursor.is_eof() {
            let parent = open_elements.last().copied().unwrap_or(root);
            if cursor.peek() != Some(b'<') {
                let text = cursor.read_until_or_end(b"<");
                arena.nodes[parent].data = text;
                continue;
            }

            let tag_start = cursor.position();
            let header = parse_tag(&mut cursor)?;

            if let Some(closing) = header.closing_name() {
                let Some(&current) = open_elements.last() else {
                    return Err(ParseError::new(ParseErrorCode::StackUnderflow, tag_start));
                };
                if arena.nodes[current].name != closing {
                    return Err(ParseError::new(
                        ParseErrorCode::OpenCloseMismatch,
                        tag_start,
                    ));
                }
                open_elements.pop();
                #[cfg(any(test, feature = "debug-trace"))]
                log::trace!(
                    target: "markup.builder",
                    "close <{closing}> depth={}",
                    open_elements.len()
                );
                continue;
            }

            let child = arena.add_child(parent, ArenaNode::new(header.name, header.attrs));
            if !header.leaf {
                open_elements.push(child);
                #[cfg(any(test, feature = "debug-trace"))]
                log::trace!(
                    target: "markup.builder",
                    "open <{}> depth={}",
                    header.name,
                    open_elements.len()
                );
            }
        }

        if !open_elements.is_empty() {
            return Err(ParseError::new(ParseErrorCode::Incomplete, end));
        }

        let top_level = &arena.nodes[root].children;
        if cfg!(any(test, feature = "debug-trace")) && top_level.len() > 1 {
            log::trace!(
                target: "markup.builder",
                "ignoring {} top-level siblings after the root element",
                top_level.len() - 1
            );
        }
        let Some(&top) = top_level.first() else {
            return Err(ParseError::new(ParseErrorCode::Incomplete, end));
        };
        arena
            .into_tree(top)
            .ok_or_else(|| ParseError::new(ParseErrorCode::Incomplete, end))
    }
}

/// Parses `input` with the default configuration.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    Parser::default().parse(input)
}

#[derive(Debug)]
struct ArenaNode<'a> {
    name: &'a str,
    data: &'a str,
    attrs: Vec<Attribute>,
    children: Vec<usize>,
}

impl<'a> ArenaNode<'a> {
    fn new(name: &'a str, attrs: Vec<Attribute>) -> Self {
        Self {
            name,
            data: "",
            attrs,
            children: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct NodeArena<'a> {
    nodes: Vec<ArenaNode<'a>>,
}

impl<'a> NodeArena<'a> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: ArenaNode<'a>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    fn add_child(&mut self, parent_index: usize, child: ArenaNode<'a>) -> usize {
        let child_index = self.push(child);
        self.nodes[parent_index].children.push(child_index);
        child_index
    }

    fn into_tree(self, top: usize) -> Option<Node> {
        let mut nodes = self.nodes;
        let mut built: Vec<Node> = Vec::with_capacity(nodes.len());

        // Iterative postorder over the arena. When a node is seen the second
        // time, its direct children are the last `children.len()` entries of
        // `built`, in document order.
        let mut stack: Vec<(usize, bool)> = vec![(top, false)];
        while let Some((index, visited)) = stack.pop() {
            if !visited {
                stack.push((index, true));
                for &child in nodes[index].children.iter().rev() {
                    stack.push((child, false));
                }
                continue;
            }

            let node = &mut nodes[index];
            let children = built.split_off(built.len() - node.children.len());
            built.push(Node::from_parts(
                node.name.to_string(),
                node.data.to_string(),
                std::mem::take(&mut node.attrs),
                children,
            ));
        }

        debug_assert_eq!(built.len(), 1, "tree builder should build exactly one root");
        built.pop()
    }
}
