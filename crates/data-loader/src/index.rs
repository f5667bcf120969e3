//! DataIndex building logic.
//!
//! Loading is one pass over the file followed by two independent index
//! builds (genre buckets and title lookup), which run in parallel.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, instrument};

impl DataIndex {
    /// Load the movie metadata file and build every index.
    ///
    /// Malformed rows are dropped and counted; only file-level problems
    /// (missing file, I/O failure) are returned as errors.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let lines = parser::read_lines_lossy(path)?;
        let file_label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let parsed = parser::parse_entries(&file_label, &lines);
        let mut index = Self::from_entries(parsed.entries);
        index.skipped_rows = parsed.skipped;

        let (titles, rows, skipped) = index.counts();
        info!(
            "Loaded {} rows ({} distinct titles, {} genre buckets), skipped {} malformed rows",
            rows,
            titles,
            index.genre_index.len(),
            skipped
        );
        Ok(index)
    }

    /// Build both indices from already parsed entries, keeping their order.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let (genre_index, title_index) = rayon::join(
            || build_genre_index(&entries),
            || build_title_index(&entries),
        );

        Self {
            genre_index,
            title_index,
            skipped_rows: 0,
        }
    }
}

fn build_genre_index(entries: &[Entry]) -> HashMap<String, Vec<Entry>> {
    let mut index: HashMap<String, Vec<Entry>> = HashMap::new();
    for entry in entries {
        index
            .entry(entry.genre_tag.clone())
            .or_default()
            .push(entry.clone());
    }
    index
}

fn build_title_index(entries: &[Entry]) -> BTreeMap<String, Entry> {
    entries
        .iter()
        .map(|entry| (entry.title.clone(), entry.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;
    use std::fs;

    #[test]
    fn test_from_entries_keeps_file_order_per_genre() {
        let index = DataIndex::from_entries(vec![
            Entry::new("Heat", "Action", 170, 17.9),
            Entry::new("Up", "Animation", 96, 19.3),
            Entry::new("Speed", "Action", 116, 11.0),
        ]);

        let action: Vec<&str> = index
            .entries_for_genre("Action")
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(action, vec!["Heat", "Speed"]);
        assert_eq!(index.counts(), (3, 3, 0));
    }

    #[test]
    fn test_duplicate_title_last_row_wins() {
        let index = DataIndex::from_entries(vec![
            Entry::new("Hamlet", "Drama", 242, 6.0),
            Entry::new("Hamlet", "Drama", 112, 4.0),
        ]);

        assert_eq!(index.get_entry("Hamlet").unwrap().runtime, 112);
        // Both rows stay in the genre bucket
        assert_eq!(index.entries_for_genre("Drama").len(), 2);
        assert_eq!(index.counts(), (1, 2, 0));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "film-finder-index-{}.csv",
            std::process::id()
        ));
        fs::write(
            &path,
            "original_title,lang,runtime,popularity,genres\r\n\
             Heat,en,170.0,17.9,Action\r\n\
             Nope,en,n/a,1.0,Action\r\n\
             Up,en,96.0,19.3,Animation\r\n",
        )
        .unwrap();

        let index = DataIndex::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(index.counts(), (2, 2, 1));
        assert_eq!(index.entries_for_genre("Action")[0].runtime, 170);
        assert!(index.get_entry("Nope").is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = DataIndex::load_from_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
