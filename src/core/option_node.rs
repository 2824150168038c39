use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::LazyLock;

use indexmap::IndexMap;
use tracing::trace;

use crate::core::js_expr::JsExpr;
use crate::core::value::{OptionValue, Scalar};
use crate::error::{ChartError, ChartResult};

/// Key of a child option: a sequential position or a property name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    Index(u64),
    Name(String),
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl OptionKey {
    /// Builds a key from a property name.
    ///
    /// A name spelled as a canonical unsigned integer (`"0"`, `"17"`, but not
    /// `"07"` or `"-1"`) is the same key as the matching index, so `"0"` and
    /// `0` address one child.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        let name = name.into();
        match canonical_index(&name) {
            Some(index) => Self::Index(index),
            None => Self::Name(name),
        }
    }
}

fn canonical_index(name: &str) -> Option<u64> {
    let canonical = match name.as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    };
    if canonical { name.parse().ok() } else { None }
}

impl From<&str> for OptionKey {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<String> for OptionKey {
    fn from(name: String) -> Self {
        Self::name(name)
    }
}

impl From<&String> for OptionKey {
    fn from(name: &String) -> Self {
        Self::name(name.as_str())
    }
}

impl From<u64> for OptionKey {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<u32> for OptionKey {
    fn from(index: u32) -> Self {
        Self::Index(u64::from(index))
    }
}

impl From<usize> for OptionKey {
    fn from(index: usize) -> Self {
        Self::Index(index as u64)
    }
}

/// Negative positions are never sequential, so they are kept as property names.
impl From<i32> for OptionKey {
    fn from(index: i32) -> Self {
        match u64::try_from(index) {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Name(index.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Children {
    entries: IndexMap<OptionKey, OptionNode>,
    /// One past the largest index ever used; removal never lowers it.
    /// Wider than `u64` so a child at `u64::MAX` still leaves room to append.
    next_index: u128,
}

impl Children {
    fn from_value(value: OptionValue) -> Option<Self> {
        let mut children = Self::default();
        match value {
            OptionValue::Array(items) => {
                for item in items {
                    children.push(OptionNode::new(item));
                }
            }
            OptionValue::Object(entries) => {
                for (name, item) in entries {
                    children.insert(OptionKey::name(name), OptionNode::new(item));
                }
            }
            OptionValue::Scalar(_) | OptionValue::Expr(_) => return None,
        }
        Some(children)
    }

    fn track(&mut self, key: &OptionKey) {
        if let OptionKey::Index(index) = key {
            self.next_index = self.next_index.max(u128::from(*index) + 1);
        }
    }

    fn insert(&mut self, key: OptionKey, node: OptionNode) -> &mut OptionNode {
        self.track(&key);
        let (position, _) = self.entries.insert_full(key, node);
        &mut self.entries[position]
    }

    fn entry(&mut self, key: OptionKey) -> &mut OptionNode {
        self.track(&key);
        self.entries.entry(key).or_default()
    }

    /// Past `u64::MAX` the appended child gets its position as a property name.
    fn push(&mut self, node: OptionNode) -> &mut OptionNode {
        let key = u64::try_from(self.next_index).map_or_else(
            |_| OptionKey::Name(self.next_index.to_string()),
            OptionKey::Index,
        );
        self.next_index += 1;
        self.insert(key, node)
    }

    fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(position, key)| *key == OptionKey::Index(position as u64))
    }

    fn resolve(&self) -> OptionValue {
        if self.entries.is_empty() {
            return OptionValue::NULL;
        }
        if self.is_list() {
            return OptionValue::Array(self.entries.values().map(OptionNode::value).collect());
        }
        OptionValue::Object(
            self.entries
                .iter()
                .map(|(key, node)| (key.to_string(), node.value()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Terminal {
    Scalar(Scalar),
    Expr(JsExpr),
}

/// Node of a chart option tree.
///
/// A node is either terminal (a [`Scalar`] or a [`JsExpr`]) or a composite
/// holding ordered children. Writing a terminal value drops the children and
/// touching a child drops the terminal value, so the last write wins.
///
/// Lookups through [`get`](Self::get) or `IndexMut` create missing children on
/// the fly, which keeps deep builder chains free of error handling:
///
/// ```
/// use highchart_rs::core::OptionNode;
///
/// let mut options = OptionNode::default();
/// options.get("chart").set("type", "spline");
/// options["title"]["text"] = OptionNode::new("Monthly Average Temperature");
/// options.get("series").push().set("data", [7.0, 6.9, 9.5]);
///
/// assert!(options.has("title"));
/// assert!(!options.has("legend"));
/// ```
///
/// `Clone` copies the whole subtree; clones never share children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionNode {
    /// When set, `children` is empty.
    terminal: Option<Terminal>,
    children: Children,
}

static EMPTY_NODE: LazyLock<OptionNode> = LazyLock::new(OptionNode::default);

impl OptionNode {
    #[must_use]
    pub fn new(value: impl Into<OptionValue>) -> Self {
        let mut node = Self::default();
        node.set_value(value);
        node
    }

    /// Replaces the whole content of this node.
    ///
    /// Scalars and expressions make the node terminal. Arrays and objects are
    /// wrapped entry by entry into fresh children.
    pub fn set_value(&mut self, value: impl Into<OptionValue>) {
        let value = value.into();
        if !self.children.entries.is_empty() && !value.is_composite() {
            trace!(
                discarded = self.children.entries.len(),
                "terminal value replaces option children"
            );
        }
        match value {
            OptionValue::Scalar(scalar) => {
                self.terminal = Some(Terminal::Scalar(scalar));
                self.children = Children::default();
            }
            OptionValue::Expr(expr) => {
                self.terminal = Some(Terminal::Expr(expr));
                self.children = Children::default();
            }
            composite => {
                self.terminal = None;
                self.children = Children::from_value(composite).unwrap_or_default();
            }
        }
    }

    /// Resolves the subtree into a plain value.
    ///
    /// Composites whose keys are exactly `0, 1, 2, ...` in insertion order
    /// resolve to arrays, all others to objects. An empty node resolves to null.
    #[must_use]
    pub fn value(&self) -> OptionValue {
        match &self.terminal {
            Some(Terminal::Scalar(scalar)) => OptionValue::Scalar(scalar.clone()),
            Some(Terminal::Expr(expr)) => OptionValue::Expr(expr.clone()),
            None => self.children.resolve(),
        }
    }

    /// Returns the child at `key`, creating an empty one when absent.
    pub fn get(&mut self, key: impl Into<OptionKey>) -> &mut OptionNode {
        self.children_mut().entry(key.into())
    }

    /// Appends an empty child at the next sequential index.
    pub fn push(&mut self) -> &mut OptionNode {
        self.children_mut().push(Self::default())
    }

    /// Creates or replaces the child at `key` with a node built from `value`.
    pub fn set(
        &mut self,
        key: impl Into<OptionKey>,
        value: impl Into<OptionValue>,
    ) -> &mut OptionNode {
        self.children_mut().insert(key.into(), Self::new(value))
    }

    /// Appends a node built from `value` at the next sequential index.
    pub fn push_value(&mut self, value: impl Into<OptionValue>) -> &mut OptionNode {
        self.children_mut().push(Self::new(value))
    }

    /// Creates or replaces the child at `key` with an existing subtree.
    pub fn insert(&mut self, key: impl Into<OptionKey>, node: OptionNode) -> &mut OptionNode {
        self.children_mut().insert(key.into(), node)
    }

    #[must_use]
    pub fn has(&self, key: impl Into<OptionKey>) -> bool {
        self.child(key).is_some()
    }

    /// Removes the child at `key`, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: impl Into<OptionKey>) -> Option<OptionNode> {
        self.children.entries.shift_remove(&key.into())
    }

    /// Looks up a child without creating it.
    #[must_use]
    pub fn child(&self, key: impl Into<OptionKey>) -> Option<&OptionNode> {
        self.children.entries.get(&key.into())
    }

    pub fn child_mut(&mut self, key: impl Into<OptionKey>) -> Option<&mut OptionNode> {
        self.children.entries.get_mut(&key.into())
    }

    /// Strict lookup: fails with [`ChartError::KeyNotFound`] instead of creating the child.
    pub fn try_get(&self, key: impl Into<OptionKey>) -> ChartResult<&OptionNode> {
        let key = key.into();
        self.children
            .entries
            .get(&key)
            .ok_or_else(|| ChartError::KeyNotFound(key.to_string()))
    }

    #[must_use]
    pub fn scalar(&self) -> Option<&Scalar> {
        match &self.terminal {
            Some(Terminal::Scalar(scalar)) => Some(scalar),
            _ => None,
        }
    }

    #[must_use]
    pub fn expr(&self) -> Option<&JsExpr> {
        match &self.terminal {
            Some(Terminal::Expr(expr)) => Some(expr),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Number of direct children; terminal nodes have none.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.entries.len()
    }

    /// `true` for a node that holds neither a terminal value nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terminal.is_none() && self.children.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &OptionKey> {
        self.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &OptionNode)> {
        self.children.entries.iter()
    }

    fn children_mut(&mut self) -> &mut Children {
        if self.terminal.take().is_some() {
            trace!("child access clears terminal option value");
        }
        &mut self.children
    }
}

impl From<OptionValue> for OptionNode {
    fn from(value: OptionValue) -> Self {
        Self::new(value)
    }
}

impl From<JsExpr> for OptionNode {
    fn from(expr: JsExpr) -> Self {
        Self::new(expr)
    }
}

/// Read access; an absent key yields a shared empty node and creates nothing.
impl<K: Into<OptionKey>> Index<K> for OptionNode {
    type Output = OptionNode;

    fn index(&self, key: K) -> &OptionNode {
        self.child(key).unwrap_or(&*EMPTY_NODE)
    }
}

/// Write access; an absent key is created, like [`OptionNode::get`].
impl<K: Into<OptionKey>> IndexMut<K> for OptionNode {
    fn index_mut(&mut self, key: K) -> &mut OptionNode {
        self.get(key)
    }
}
