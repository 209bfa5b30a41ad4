//! Tree data model and read-only query helpers.

use std::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Attribute {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// One slot of a batch attribute lookup (see [`Node::get_attrs`]).
///
/// `value` is written only when `key` is found; a missing key leaves the
/// slot untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttrQuery<'k, 'v> {
    pub key: &'k str,
    pub value: Option<&'v str>,
}

impl<'k> AttrQuery<'k, '_> {
    pub fn new(key: &'k str) -> Self {
        Self { key, value: None }
    }
}

/// A markup element: name, text data, attributes and owned children.
///
/// A node whose `data` and `children` are both empty is a leaf and
/// serializes in self-closing form, however it was produced.
#[derive(Clone, Debug)]
pub struct Node {
    name: String,
    data: String,
    attrs: Vec<Attribute>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "node names are non-empty");
        Self {
            name,
            data: String::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        name: String,
        data: String,
        attrs: Vec<Attribute>,
        children: Vec<Node>,
    ) -> Self {
        Self {
            name,
            data,
            attrs,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attrs
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.data.is_empty() && self.children.is_empty()
    }

    // Chained construction, consuming form.

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_attrs<A: Into<Attribute>>(mut self, attrs: impl IntoIterator<Item = A>) -> Self {
        self.attrs.extend(attrs.into_iter().map(Into::into));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    // Chained construction, in place.

    pub fn set_data(&mut self, data: impl Into<String>) -> &mut Self {
        self.data = data.into();
        self
    }

    pub fn push_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attrs.push(Attribute::new(key, value));
        self
    }

    pub fn push_child(&mut self, child: Node) -> &mut Self {
        self.children.push(child);
        self
    }

    fn attr_index(&self, key: &str) -> Option<usize> {
        self.attrs.iter().position(|a| a.key == key)
    }

    /// Value of the first attribute named `key`.
    pub fn find_attr(&self, key: &str) -> Option<&str> {
        self.attr_index(key).map(|i| self.attrs[i].value.as_str())
    }

    pub fn find_attr_mut(&mut self, key: &str) -> Option<&mut String> {
        let i = self.attr_index(key)?;
        Some(&mut self.attrs[i].value)
    }

    pub fn is_attr_equal(&self, key: &str, value: &str) -> bool {
        self.find_attr(key) == Some(value)
    }

    /// Batch lookup. Fills the slot of every query whose key is present and
    /// returns `true` only when all of them were found.
    pub fn get_attrs<'n>(&'n self, queries: &mut [AttrQuery<'_, 'n>]) -> bool {
        let mut found = 0usize;
        for query in queries.iter_mut() {
            if let Some(value) = self.find_attr(query.key) {
                query.value = Some(value);
                found += 1;
            }
        }
        found == queries.len()
    }

    /// All-or-nothing lookup of a fixed set of keys.
    pub fn attrs_array<const N: usize>(&self, keys: [&str; N]) -> Option<[&str; N]> {
        let mut out = [""; N];
        for (slot, key) in out.iter_mut().zip(keys) {
            *slot = self.find_attr(key)?;
        }
        Some(out)
    }

    /// Walks down one level per name, taking the first child with that name
    /// at each step. Siblings after the first match are never searched.
    /// An empty path yields `self`.
    pub fn find_first_child(&self, path: &[&str]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, name| node.children.iter().find(|c| c.name == *name))
    }

    pub fn find_first_child_mut(&mut self, path: &[&str]) -> Option<&mut Node> {
        path.iter().try_fold(self, |node, name| {
            node.children.iter_mut().find(|c| c.name == *name)
        })
    }
}

/// Structural equality: name, data, attributes in order, children in order.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name
            || self.data != other.data
            || self.attrs.len() != other.attrs.len()
            || self.children.len() != other.children.len()
        {
            return false;
        }
        self.attrs.iter().zip(&other.attrs).all(|(a, b)| a == b)
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a == b)
    }
}

impl Eq for Node {}

/// Attribute value by key; panics when the key is absent.
impl Index<&str> for Node {
    type Output = String;

    fn index(&self, key: &str) -> &String {
        match self.attr_index(key) {
            Some(i) => &self.attrs[i].value,
            None => panic!("no attribute {key:?} on <{}>", self.name),
        }
    }
}

impl IndexMut<&str> for Node {
    fn index_mut(&mut self, key: &str) -> &mut String {
        match self.attr_index(key) {
            Some(i) => &mut self.attrs[i].value,
            None => panic!("no attribute {key:?} on <{}>", self.name),
        }
    }
}
