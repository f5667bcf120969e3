//! Integration tests for the pipeline.
//!
//! These run the loader, catalog and pipeline together on a small
//! in-memory dataset laid out like the real metadata file.

use catalog::{FilterMode, TraversalOrder};
use data_loader::{DataIndex, Genre, parse_entries};
use pipeline::{FilterCriteria, FilterPipeline, FilterStage, RelaxationPolicy, pick_from_catalog};
use rand::SeedableRng;
use rand::rngs::StdRng;

const METADATA: &str = "\
original_title,original_language,runtime,popularity,genres
Die Hard,en,132.0,19.8,Action
Commando,en,90.0,6.1,Action
Speed,en,116.0,11.2,Action
Crank,en,88.0,4.0,Action
Toy Story,en,81.0,21.9,Animation
Broken Row,en,,,Action
Heat,en,170.0,17.9,Action
";

fn create_test_setup() -> DataIndex {
    let lines: Vec<String> = METADATA.lines().map(str::to_string).collect();
    let parsed = parse_entries("metadata.csv", &lines);
    assert_eq!(parsed.skipped, 1);
    DataIndex::from_entries(parsed.entries)
}

fn titles(entries: &[data_loader::Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

#[test]
fn test_full_query_from_menu_genre() {
    let index = create_test_setup();
    let genre = Genre::from_menu_number(1).unwrap();

    let source = FilterPipeline::build_catalog(index.entries_for_genre(genre.name()));
    assert_eq!(source.len(), 5);

    // Die Hard is the root; Commando (90) fails popularity and prunes Speed,
    // which sits in its right subtree. Crank (88) also fails but is a leaf.
    let outcome = FilterPipeline::new().apply(&source, &FilterCriteria::new(genre.name(), 200, 10.0));

    assert_eq!(outcome.stage, FilterStage::Primary);
    assert_eq!(titles(&outcome.entries), vec!["Die Hard", "Heat"]);
    assert!(outcome.entries.windows(2).all(|w| w[0].runtime <= w[1].runtime));

    // The source catalog is untouched by filtering
    assert_eq!(source.traverse_depth_first(), 5);
    assert_eq!(source.traverse_breadth_first(), 5);
}

#[test]
fn test_exhaustive_query_finds_pruned_match() {
    let index = create_test_setup();

    let outcome = FilterPipeline::new()
        .with_mode(FilterMode::Exhaustive)
        .run(index.entries_for_genre("Action"), &FilterCriteria::new("Action", 200, 10.0));

    assert_eq!(titles(&outcome.entries), vec!["Speed", "Die Hard", "Heat"]);
}

#[test]
fn test_relaxed_query_returns_relaxed_result() {
    let index = create_test_setup();

    // Primary: <= 80 minutes, popularity >= 8. Crank is the first in-order
    // match and fails, so primary is empty. Relaxed: <= 110 and >= 3.
    let outcome = FilterPipeline::new().run(
        index.entries_for_genre("Action"),
        &FilterCriteria::new("Action", 80, 8.0),
    );

    assert!(outcome.was_relaxed());
    assert_eq!(outcome.criteria, FilterCriteria::new("Action", 110, 3.0));
    assert_eq!(titles(&outcome.entries), vec!["Crank", "Commando"]);
}

#[test]
fn test_relaxed_query_can_still_be_empty() {
    let index = create_test_setup();

    let outcome = FilterPipeline::new()
        .with_relaxation(RelaxationPolicy::new().with_runtime_step(0))
        .run(index.entries_for_genre("Action"), &FilterCriteria::new("Action", 30, 0.0));

    assert_eq!(outcome.stage, FilterStage::Relaxed);
    assert!(outcome.is_empty());
    assert!(outcome.filtered.is_empty());
}

#[test]
fn test_unknown_genre_bucket_is_empty() {
    let index = create_test_setup();

    let outcome = FilterPipeline::new().run(
        index.entries_for_genre(Genre::Western.name()),
        &FilterCriteria::new(Genre::Western.name(), 500, 0.0),
    );

    assert!(outcome.is_empty());
}

#[test]
fn test_surprise_pick_from_genre_catalog() {
    let index = create_test_setup();
    let source = FilterPipeline::build_catalog(index.entries_for_genre("Action"));
    let mut rng = StdRng::seed_from_u64(2024);

    let picked = pick_from_catalog(&source, TraversalOrder::BreadthFirst, &mut rng).unwrap();
    assert_eq!(picked.genre_tag, "Action");
}
