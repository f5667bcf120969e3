//! Core domain types for the movie catalog.
//!
//! - `Entry`: one immutable movie record
//! - `Genre`: the fixed 21-item genre menu
//! - `DataIndex`: genre and title lookups built once at load time

use crate::error::DataLoadError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Movie length in whole minutes
pub type Runtime = i32;

/// Popularity score as published in the metadata file (unbounded, >= 0 in practice)
pub type Popularity = f64;

// =============================================================================
// Entry
// =============================================================================

/// One movie record.
///
/// Entries have no identity beyond their title, and duplicate titles are
/// allowed. Fields are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    /// Raw genre column, possibly a multi-genre delimited string
    pub genre_tag: String,
    pub runtime: Runtime,
    pub popularity: Popularity,
}

impl Entry {
    pub fn new(
        title: impl Into<String>,
        genre_tag: impl Into<String>,
        runtime: Runtime,
        popularity: Popularity,
    ) -> Self {
        Self {
            title: title.into(),
            genre_tag: genre_tag.into(),
            runtime,
            popularity,
        }
    }

    /// Substring test on the raw genre column
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre_tag.contains(genre)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} min, {} popularity)",
            self.title, self.runtime, self.popularity
        )
    }
}

// =============================================================================
// Genre menu
// =============================================================================

/// Genres offered by the numbered menu (1-21).
///
/// The catalog core never sees this type: it only receives `name()` and
/// matches it as an opaque substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    Fiction,
    Foreign,
    History,
    Horror,
    Music,
    Mystery,
    Romance,
    Science,
    Thriller,
    TvMovie,
    War,
    Western,
}

impl Genre {
    /// Menu order; index + 1 is the menu number
    pub const ALL: [Genre; 21] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Family,
        Genre::Fantasy,
        Genre::Fiction,
        Genre::Foreign,
        Genre::History,
        Genre::Horror,
        Genre::Music,
        Genre::Mystery,
        Genre::Romance,
        Genre::Science,
        Genre::Thriller,
        Genre::TvMovie,
        Genre::War,
        Genre::Western,
    ];

    /// Look up a genre by its 1-based menu number
    pub fn from_menu_number(number: u8) -> Option<Genre> {
        let idx = usize::from(number).checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn menu_number(self) -> u8 {
        // ALL has 21 entries, so the position always fits in a u8
        Self::ALL.iter().position(|&g| g == self).unwrap_or(0) as u8 + 1
    }

    /// Name as it appears in the data file's genre column
    pub fn name(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Family => "Family",
            Genre::Fantasy => "Fantasy",
            Genre::Fiction => "Fiction",
            Genre::Foreign => "Foreign",
            Genre::History => "History",
            Genre::Horror => "Horror",
            Genre::Music => "Music",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::Science => "Science",
            Genre::Thriller => "Thriller",
            Genre::TvMovie => "TV Movie",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a menu number ("7") or a case-insensitive name ("drama", "TV Movie")
impl FromStr for Genre {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let by_number = s.parse::<u8>().ok().and_then(Genre::from_menu_number);
        by_number
            .or_else(|| {
                Genre::ALL
                    .iter()
                    .copied()
                    .find(|g| g.name().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| DataLoadError::InvalidValue {
                field: "genre".to_string(),
                value: s.to_string(),
            })
    }
}

// =============================================================================
// DataIndex
// =============================================================================

/// In-memory lookups over every well-formed row of the metadata file.
///
/// - `genre_index`: raw genre column -> entries, in file order
/// - `title_index`: title -> entry, the last row with a given title wins
#[derive(Debug, Default)]
pub struct DataIndex {
    pub(crate) genre_index: HashMap<String, Vec<Entry>>,
    pub(crate) title_index: BTreeMap<String, Entry>,
    /// Rows dropped by the parser during the last load
    pub(crate) skipped_rows: usize,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries whose raw genre column equals `genre_tag` exactly.
    ///
    /// Returns an empty slice when no such bucket exists.
    pub fn entries_for_genre(&self, genre_tag: &str) -> &[Entry] {
        self.genre_index
            .get(genre_tag)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get an entry by title
    pub fn get_entry(&self, title: &str) -> Option<&Entry> {
        self.title_index.get(title)
    }

    /// All titled entries, ordered by title
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &Entry> {
        self.title_index.values()
    }

    /// Distinct raw genre columns seen during loading
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genre_index.keys().map(String::as_str)
    }

    /// (distinct titles, genre-indexed rows, skipped rows)
    pub fn counts(&self) -> (usize, usize, usize) {
        let rows = self.genre_index.values().map(|v| v.len()).sum();
        (self.title_index.len(), rows, self.skipped_rows)
    }
}
