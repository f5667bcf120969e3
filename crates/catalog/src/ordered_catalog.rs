//! Runtime-keyed binary search tree of movie entries.
//!
//! Each node exclusively owns its two children, so the tree is dropped by
//! ordinary ownership. The tree never rebalances: sorted input produces a
//! chain as deep as the catalog is long, so every walk in this module
//! (insert, filter, flatten, drop) uses an explicit stack instead of
//! recursion.

use data_loader::{Entry, Popularity, Runtime};
use std::fmt;
use tracing::trace;

pub(crate) type Link = Option<Box<Node>>;

pub(crate) struct Node {
    pub(crate) entry: Entry,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    fn new(entry: Entry) -> Self {
        Self {
            entry,
            left: None,
            right: None,
        }
    }
}

/// What `filter_into` does when a genre-matching entry fails the
/// runtime/popularity test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Skip the failing node's right subtree, then resume with its
    /// ancestors. Later matches with a higher runtime under that node are
    /// never seen.
    #[default]
    PruneOnMismatch,
    /// Skip only the failing entry and keep walking.
    Exhaustive,
}

/// Binary search tree keyed by `Entry::runtime`.
///
/// Left subtrees hold strictly smaller runtimes; equal runtimes go right, so
/// an in-order walk yields ties in insertion order.
///
/// ## Usage
/// ```ignore
/// let source: OrderedCatalog = index.entries_for_genre("Action").iter().cloned().collect();
/// let mut filtered = OrderedCatalog::new();
/// source.filter_into("Action", 120, 10.0, &mut filtered);
///
/// let mut results = Vec::new();
/// filtered.flatten_to_sequence(&mut results);
/// ```
#[derive(Default)]
pub struct OrderedCatalog {
    pub(crate) root: Link,
    len: usize,
}

impl OrderedCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert an entry at the first free slot on its search path.
    ///
    /// Smaller runtimes descend left, equal or larger descend right.
    pub fn insert(&mut self, entry: Entry) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if entry.runtime < node.entry.runtime {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(Node::new(entry)));
        self.len += 1;
    }

    /// Copy matching entries into `target` during an in-order walk, using
    /// [`FilterMode::PruneOnMismatch`].
    ///
    /// - Entries whose genre tag does not contain `genre` are passed over
    /// - Matching entries with `runtime <= max_runtime` and
    ///   `popularity >= min_popularity` are inserted into `target`
    /// - A matching entry failing that test prunes its right subtree
    pub fn filter_into(
        &self,
        genre: &str,
        max_runtime: Runtime,
        min_popularity: Popularity,
        target: &mut OrderedCatalog,
    ) {
        self.filter_into_with(
            genre,
            max_runtime,
            min_popularity,
            FilterMode::PruneOnMismatch,
            target,
        );
    }

    /// Same as [`filter_into`](Self::filter_into) with an explicit mode.
    pub fn filter_into_with(
        &self,
        genre: &str,
        max_runtime: Runtime,
        min_popularity: Popularity,
        mode: FilterMode,
        target: &mut OrderedCatalog,
    ) {
        let mut stack = Vec::new();
        push_left_spine(&mut stack, self.root.as_deref());

        while let Some(node) = stack.pop() {
            let entry = &node.entry;
            if entry.has_genre(genre) {
                if entry.runtime <= max_runtime && entry.popularity >= min_popularity {
                    target.insert(entry.clone());
                } else if mode == FilterMode::PruneOnMismatch {
                    trace!(title = %entry.title, "pruning right subtree");
                    continue;
                }
            }
            push_left_spine(&mut stack, node.right.as_deref());
        }
    }

    /// Append every entry to `target` in ascending runtime order.
    pub fn flatten_to_sequence(&self, target: &mut Vec<Entry>) {
        target.reserve(self.len);
        target.extend(self.iter().cloned());
    }

    /// In-order (ascending runtime) iterator over the entries.
    pub fn iter(&self) -> Iter<'_> {
        let mut stack = Vec::new();
        push_left_spine(&mut stack, self.root.as_deref());
        Iter { stack }
    }
}

/// Push `node` and its chain of left descendants.
fn push_left_spine<'a>(stack: &mut Vec<&'a Node>, mut node: Option<&'a Node>) {
    while let Some(current) = node {
        stack.push(current);
        node = current.left.as_deref();
    }
}

/// In-order iterator returned by [`OrderedCatalog::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        push_left_spine(&mut self.stack, node.right.as_deref());
        Some(&node.entry)
    }
}

impl<'a> IntoIterator for &'a OrderedCatalog {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Entry> for OrderedCatalog {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl FromIterator<Entry> for OrderedCatalog {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut catalog = OrderedCatalog::new();
        catalog.extend(iter);
        catalog
    }
}

impl fmt::Debug for OrderedCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// The derived drop would recurse once per level.
impl Drop for OrderedCatalog {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
