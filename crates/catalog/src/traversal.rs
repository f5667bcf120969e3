//! Whole-tree walks and rank selection.
//!
//! `traverse_*` exist so callers can time a full walk of a catalog; they
//! touch every node and produce nothing but the node count. The `pick_*`
//! helpers return the Nth node of a given walk order, which lets callers
//! choose a random entry without building a separate index.

use crate::ordered_catalog::{Node, OrderedCatalog};
use data_loader::Entry;
use std::collections::VecDeque;

/// Walk order used by rank selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// In-order, i.e. ascending runtime
    DepthFirst,
    /// Level by level from the root, left child before right
    BreadthFirst,
}

impl OrderedCatalog {
    /// Visit every node depth-first (left subtree, then right subtree).
    ///
    /// Returns the number of nodes visited, always `self.len()`.
    pub fn traverse_depth_first(&self) -> usize {
        let mut visited = 0;
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            visited += 1;
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        visited
    }

    /// Visit every node in level order using a FIFO queue.
    ///
    /// Returns the number of nodes visited, always `self.len()`.
    pub fn traverse_breadth_first(&self) -> usize {
        self.breadth_first().count()
    }

    /// Level-order iterator over the entries.
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst {
            queue: self.root.as_deref().into_iter().collect(),
        }
    }

    /// The entry at zero-based `rank` in in-order (ascending runtime) order.
    ///
    /// `None` when the catalog is empty or `rank >= len()`.
    pub fn pick_depth_first(&self, rank: usize) -> Option<&Entry> {
        self.iter().nth(rank)
    }

    /// The entry at zero-based `rank` in level order.
    ///
    /// `None` when the catalog is empty or `rank >= len()`.
    pub fn pick_breadth_first(&self, rank: usize) -> Option<&Entry> {
        self.breadth_first().nth(rank)
    }

    pub fn pick(&self, order: TraversalOrder, rank: usize) -> Option<&Entry> {
        match order {
            TraversalOrder::DepthFirst => self.pick_depth_first(rank),
            TraversalOrder::BreadthFirst => self.pick_breadth_first(rank),
        }
    }

    /// Number of levels; 0 for an empty catalog, `len()` for a chain.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut queue: VecDeque<(&Node, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = queue.pop_front() {
            height = height.max(depth);
            queue.extend(node.left.as_deref().map(|child| (child, depth + 1)));
            queue.extend(node.right.as_deref().map(|child| (child, depth + 1)));
        }
        height
    }
}

/// Level-order iterator returned by [`OrderedCatalog::breadth_first`].
pub struct BreadthFirst<'a> {
    queue: VecDeque<&'a Node>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left.as_deref());
        self.queue.extend(node.right.as_deref());
        Some(&node.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(runtimes: &[i32]) -> OrderedCatalog {
        runtimes
            .iter()
            .map(|&r| Entry::new(format!("m{r}"), "Drama", r, 1.0))
            .collect()
    }

    #[test]
    fn test_traversals_visit_every_node() {
        let catalog = catalog(&[50, 30, 70, 20, 40, 60, 80, 65]);
        assert_eq!(catalog.traverse_depth_first(), 8);
        assert_eq!(catalog.traverse_breadth_first(), 8);
    }

    #[test]
    fn test_traversals_on_empty_catalog() {
        let catalog = OrderedCatalog::new();
        assert_eq!(catalog.traverse_depth_first(), 0);
        assert_eq!(catalog.traverse_breadth_first(), 0);
        assert_eq!(catalog.height(), 0);
    }

    #[test]
    fn test_breadth_first_is_level_order() {
        let catalog = catalog(&[50, 30, 70, 20, 40, 60, 80]);
        let runtimes: Vec<i32> = catalog.breadth_first().map(|e| e.runtime).collect();
        assert_eq!(runtimes, vec![50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(catalog.height(), 3);
    }

    #[test]
    fn test_pick_depth_first_follows_runtime_order() {
        let catalog = catalog(&[50, 30, 70, 20]);
        assert_eq!(catalog.pick_depth_first(0).unwrap().runtime, 20);
        assert_eq!(catalog.pick_depth_first(2).unwrap().runtime, 50);
        assert_eq!(catalog.pick_depth_first(3).unwrap().runtime, 70);
    }

    #[test]
    fn test_pick_breadth_first_follows_level_order() {
        let catalog = catalog(&[50, 30, 70, 20]);
        assert_eq!(catalog.pick_breadth_first(0).unwrap().runtime, 50);
        assert_eq!(catalog.pick_breadth_first(2).unwrap().runtime, 70);
        assert_eq!(catalog.pick(TraversalOrder::BreadthFirst, 3).unwrap().runtime, 20);
    }

    #[test]
    fn test_pick_out_of_range_is_none() {
        let catalog = catalog(&[50, 30]);
        assert!(catalog.pick_depth_first(2).is_none());
        assert!(catalog.pick_breadth_first(99).is_none());
        assert!(OrderedCatalog::new().pick(TraversalOrder::DepthFirst, 0).is_none());
    }

    #[test]
    fn test_sorted_input_degenerates_to_chain() {
        let catalog = catalog(&[10, 20, 30, 40, 50]);
        assert_eq!(catalog.height(), 5);
    }
}
