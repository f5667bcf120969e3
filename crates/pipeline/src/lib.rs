//! Query pipeline over genre catalogs.
//!
//! This crate provides:
//! - FilterCriteria and RelaxationPolicy for describing a query
//! - FilterPipeline for the filter-with-one-fallback policy
//! - Surprise selection with a caller-supplied random source
//!
//! ## Architecture
//! A query runs in stages:
//! 1. The genre bucket from `DataIndex` is inserted into a source catalog
//! 2. The source catalog is filtered into a fresh catalog and flattened
//! 3. If that produced nothing, step 2 is repeated once with relaxed criteria
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterCriteria, FilterPipeline};
//!
//! let pipeline = FilterPipeline::new();
//! let outcome = pipeline.run(
//!     index.entries_for_genre("Drama"),
//!     &FilterCriteria::new("Drama", 120, 10.0),
//! );
//!
//! if outcome.was_relaxed() {
//!     println!("Relaxed to {:?}", outcome.criteria);
//! }
//! ```

pub mod criteria;
pub mod filter_pipeline;
pub mod surprise;

// Re-export main types
pub use criteria::{FilterCriteria, RelaxationPolicy};
pub use filter_pipeline::{FilterOutcome, FilterPipeline, FilterStage};
pub use surprise::{pick_from_catalog, pick_from_index};
