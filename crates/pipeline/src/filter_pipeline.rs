//! The FilterPipeline runs a compound query against a genre catalog.
//!
//! Two stages, each a pure function of its inputs:
//! 1. Primary: filter the source catalog with the caller's criteria
//! 2. Relaxed: only if stage 1 found nothing, filter the same source catalog
//!    again with widened criteria
//!
//! There is no third attempt. An empty relaxed result is the final answer.

use crate::criteria::{FilterCriteria, RelaxationPolicy};
use catalog::{FilterMode, OrderedCatalog};
use data_loader::Entry;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Which stage produced a `FilterOutcome`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterStage {
    Primary,
    Relaxed,
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct FilterOutcome {
    pub stage: FilterStage,
    /// Criteria that produced `entries` (the relaxed ones for `Relaxed`)
    pub criteria: FilterCriteria,
    /// Catalog the entries were flattened from
    pub filtered: OrderedCatalog,
    /// Matches in ascending runtime order
    pub entries: Vec<Entry>,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the primary stage found nothing and relaxation was tried
    pub fn was_relaxed(&self) -> bool {
        self.stage == FilterStage::Relaxed
    }
}

/// Builds per-query catalogs and applies the filter-with-fallback policy.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .with_relaxation(RelaxationPolicy::new().with_runtime_step(15));
///
/// let source = FilterPipeline::build_catalog(index.entries_for_genre("Comedy"));
/// let outcome = pipeline.apply(&source, &FilterCriteria::new("Comedy", 100, 10.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    relaxation: RelaxationPolicy,
    mode: FilterMode,
}

impl FilterPipeline {
    /// Pipeline with the default relaxation policy and pruning filter mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relaxation(mut self, relaxation: RelaxationPolicy) -> Self {
        self.relaxation = relaxation;
        self
    }

    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Insert `entries` in slice order into a fresh catalog.
    pub fn build_catalog(entries: &[Entry]) -> OrderedCatalog {
        entries.iter().cloned().collect()
    }

    /// Build the source catalog from `entries` and run both stages.
    pub fn run(&self, entries: &[Entry], criteria: &FilterCriteria) -> FilterOutcome {
        let source = Self::build_catalog(entries);
        self.apply(&source, criteria)
    }

    /// Run the primary stage, falling back to one relaxed stage if it is empty.
    ///
    /// `source` is only read; both stages filter it into fresh catalogs.
    #[instrument(skip(self, source, criteria), fields(genre = %criteria.genre))]
    pub fn apply(&self, source: &OrderedCatalog, criteria: &FilterCriteria) -> FilterOutcome {
        let (filtered, entries) = self.filter_stage(source, criteria);
        debug!(
            "Primary filter: {} of {} entries (max_runtime: {}, min_popularity: {})",
            entries.len(),
            source.len(),
            criteria.max_runtime,
            criteria.min_popularity
        );
        if !entries.is_empty() {
            return FilterOutcome {
                stage: FilterStage::Primary,
                criteria: criteria.clone(),
                filtered,
                entries,
            };
        }

        let relaxed = self.relaxation.relax(criteria);
        info!(
            "No matches, relaxing to max_runtime {} and min_popularity {}",
            relaxed.max_runtime, relaxed.min_popularity
        );
        let (filtered, entries) = self.filter_stage(source, &relaxed);
        debug!("Relaxed filter: {} of {} entries", entries.len(), source.len());

        FilterOutcome {
            stage: FilterStage::Relaxed,
            criteria: relaxed,
            filtered,
            entries,
        }
    }

    fn filter_stage(
        &self,
        source: &OrderedCatalog,
        criteria: &FilterCriteria,
    ) -> (OrderedCatalog, Vec<Entry>) {
        let mut filtered = OrderedCatalog::new();
        source.filter_into_with(
            &criteria.genre,
            criteria.max_runtime,
            criteria.min_popularity,
            self.mode,
            &mut filtered,
        );

        let mut entries = Vec::new();
        filtered.flatten_to_sequence(&mut entries);
        (filtered, entries)
    }
}
