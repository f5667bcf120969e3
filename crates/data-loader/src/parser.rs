//! Parser for the comma-delimited movie metadata file.
//!
//! Column layout (zero-indexed):
//! `title, <unused>, runtime, popularity, genres, ...`
//!
//! The first line is a header. Splitting is a plain split on `,` with no
//! quoting support, so rows whose title contains a comma shift their columns
//! and are usually rejected by the numeric checks below.

use crate::error::{DataLoadError, Result};
use crate::types::{Entry, Popularity, Runtime};
use rayon::prelude::*;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

const TITLE_COL: usize = 0;
const RUNTIME_COL: usize = 2;
const POPULARITY_COL: usize = 3;
const GENRES_COL: usize = 4;

/// Minimum number of columns a row needs to yield an Entry
pub const MIN_FIELDS: usize = GENRES_COL + 1;

/// Rows that survived parsing, plus how many were dropped
#[derive(Debug, Default)]
pub struct ParsedEntries {
    /// Well-formed entries in file order
    pub entries: Vec<Entry>,
    pub skipped: usize,
}

/// Read a whole file into lines, replacing invalid UTF-8 sequences.
pub(crate) fn read_lines_lossy(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    // `lines()` also strips the '\r' of CRLF files
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}

/// Parse one data row into an Entry.
///
/// `line_no` is 1-based and only used for error context.
pub fn parse_row(file: &str, line: &str, line_no: usize) -> Result<Entry> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(DataLoadError::FieldCountMismatch {
            expected: MIN_FIELDS,
            found: fields.len(),
            line: line_no,
        });
    }

    let runtime = parse_runtime(fields[RUNTIME_COL]).ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid runtime: {:?}", fields[RUNTIME_COL]),
    })?;

    let popularity =
        parse_popularity(fields[POPULARITY_COL]).ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid popularity: {:?}", fields[POPULARITY_COL]),
        })?;

    Ok(Entry {
        title: fields[TITLE_COL].to_string(),
        genre_tag: fields[GENRES_COL].to_string(),
        runtime,
        popularity,
    })
}

/// Parse file content, skipping the header line, blank lines and malformed rows.
///
/// Rows are parsed in parallel; output keeps file order, which decides the
/// tie order of equal runtimes once the entries are inserted into a catalog.
pub fn parse_entries(file: &str, content: &[String]) -> ParsedEntries {
    let results: Vec<Result<Entry>> = content
        .par_iter()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_row(file, line, idx + 1))
        .collect();

    let mut parsed = ParsedEntries::default();
    for result in results {
        match result {
            Ok(entry) => parsed.entries.push(entry),
            Err(e) => {
                debug!("Skipping row: {}", e);
                parsed.skipped += 1;
            }
        }
    }
    parsed
}

/// Whole minutes. Decimal text such as "90.0" is truncated toward zero.
///
/// Values outside the `Runtime` range are rejected rather than clamped.
fn parse_runtime(s: &str) -> Option<Runtime> {
    let s = s.trim();
    if let Ok(minutes) = s.parse::<Runtime>() {
        return Some(minutes);
    }
    let value = s.parse::<f64>().ok().filter(|v| v.is_finite())?.trunc();
    (f64::from(Runtime::MIN)..=f64::from(Runtime::MAX))
        .contains(&value)
        .then_some(value as Runtime)
}

fn parse_popularity(s: &str) -> Option<Popularity> {
    s.trim()
        .parse::<Popularity>()
        .ok()
        .filter(|v| v.is_finite())
}
