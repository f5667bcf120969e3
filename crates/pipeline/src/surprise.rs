//! "Surprise me" selection.
//!
//! The random source is always supplied by the caller, so a seeded
//! `StdRng` gives reproducible picks.

use catalog::{OrderedCatalog, TraversalOrder};
use data_loader::{DataIndex, Entry};
use rand::Rng;
use rand::seq::IteratorRandom;

/// Uniformly random entry from the title index, `None` if it is empty.
pub fn pick_from_index<'a, R: Rng + ?Sized>(index: &'a DataIndex, rng: &mut R) -> Option<&'a Entry> {
    index.entries().choose(rng)
}

/// Draw a rank in `0..catalog.len()` and resolve it in the given walk order.
///
/// Returns `None` for an empty catalog.
pub fn pick_from_catalog<'a, R: Rng + ?Sized>(
    catalog: &'a OrderedCatalog,
    order: TraversalOrder,
    rng: &mut R,
) -> Option<&'a Entry> {
    if catalog.is_empty() {
        return None;
    }
    let rank = rng.random_range(0..catalog.len());
    catalog.pick(order, rank)
}
