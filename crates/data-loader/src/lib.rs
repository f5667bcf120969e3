//! # Data Loader Crate
//!
//! Reads the comma-delimited movie metadata file and indexes its rows.
//!
//! ## Main Components
//!
//! - **types**: `Entry`, the `Genre` menu and `DataIndex`
//! - **parser**: Row parsing; malformed rows are dropped, never surfaced
//! - **index**: Building the genre and title lookups
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DataIndex, Genre};
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_file(Path::new("movies_metadata.csv"))?;
//! let dramas = index.entries_for_genre(Genre::Drama.name());
//! println!("{} drama rows", dramas.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{ParsedEntries, parse_entries, parse_row};
pub use types::{
    // Type aliases
    Popularity,
    Runtime,
    // Core types
    DataIndex,
    Entry,
    Genre,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_index_creation() {
        let index = DataIndex::new();
        let (titles, rows, skipped) = index.counts();

        assert_eq!(titles, 0);
        assert_eq!(rows, 0);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_index_from_entries() {
        let index = DataIndex::from_entries(vec![Entry::new("Toy Story", "Animation", 81, 21.9)]);

        let retrieved = index.get_entry("Toy Story").unwrap();
        assert_eq!(retrieved.runtime, 81);
        assert_eq!(index.entries_for_genre("Animation").len(), 1);
        assert_eq!(index.genres().collect::<Vec<_>>(), vec!["Animation"]);
    }

    #[test]
    fn test_empty_queries() {
        let index = DataIndex::new();

        assert!(index.get_entry("Missing").is_none());
        assert!(index.entries_for_genre("Action").is_empty());
        assert_eq!(index.entries().len(), 0);
    }
}
