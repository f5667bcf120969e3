//! # Catalog Crate
//!
//! The ordered search structure behind every genre query: a binary search
//! tree of `Entry` values keyed by runtime.
//!
//! ## Components
//!
//! ### OrderedCatalog
//! - `insert`: unbalanced BST insert, ties go right
//! - `filter_into`: in-order copy of genre/runtime/popularity matches into a
//!   second catalog
//! - `flatten_to_sequence`: in-order copy into a `Vec`
//!
//! ### Traversal
//! - `traverse_depth_first` / `traverse_breadth_first`: full walks used for
//!   timing probes
//! - `pick_depth_first` / `pick_breadth_first`: Nth node of a walk order
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::OrderedCatalog;
//!
//! let source: OrderedCatalog = entries.iter().cloned().collect();
//! let mut filtered = OrderedCatalog::new();
//! source.filter_into("Comedy", 110, 8.0, &mut filtered);
//!
//! let mut results = Vec::new();
//! filtered.flatten_to_sequence(&mut results);
//! ```

// Public modules
pub mod ordered_catalog;
pub mod traversal;

// Re-export commonly used types
pub use ordered_catalog::{FilterMode, Iter, OrderedCatalog};
pub use traversal::{BreadthFirst, TraversalOrder};
