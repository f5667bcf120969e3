//! Query thresholds and the policy used to widen them.

use data_loader::{Popularity, Runtime};
use serde::{Deserialize, Serialize};

/// One compound query: genre membership, maximum runtime, minimum popularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Matched as a substring of each entry's raw genre tag
    pub genre: String,
    /// Inclusive upper bound, in minutes
    pub max_runtime: Runtime,
    /// Inclusive lower bound
    pub min_popularity: Popularity,
}

impl FilterCriteria {
    pub fn new(genre: impl Into<String>, max_runtime: Runtime, min_popularity: Popularity) -> Self {
        Self {
            genre: genre.into(),
            max_runtime,
            min_popularity,
        }
    }
}

/// How far thresholds move when the primary query comes back empty.
///
/// Defaults: +30 minutes of runtime, -5.0 popularity, popularity never
/// below 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationPolicy {
    runtime_step: Runtime,
    popularity_step: Popularity,
    popularity_floor: Popularity,
}

impl RelaxationPolicy {
    pub fn new() -> Self {
        Self {
            runtime_step: 30,
            popularity_step: 5.0,
            popularity_floor: 0.0,
        }
    }

    /// Configure the runtime allowance added on relaxation (default: 30)
    pub fn with_runtime_step(mut self, minutes: Runtime) -> Self {
        self.runtime_step = minutes;
        self
    }

    /// Configure the popularity reduction on relaxation (default: 5.0)
    pub fn with_popularity_step(mut self, step: Popularity) -> Self {
        self.popularity_step = step;
        self
    }

    /// Configure the lowest relaxed popularity threshold (default: 0.0)
    pub fn with_popularity_floor(mut self, floor: Popularity) -> Self {
        self.popularity_floor = floor;
        self
    }

    /// Widened copy of `criteria`; the genre is left untouched.
    ///
    /// The relaxed popularity is clamped up to the floor, so a query that
    /// started below the floor comes back at the floor.
    pub fn relax(&self, criteria: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            genre: criteria.genre.clone(),
            max_runtime: criteria.max_runtime.saturating_add(self.runtime_step),
            min_popularity: (criteria.min_popularity - self.popularity_step)
                .max(self.popularity_floor),
        }
    }
}

impl Default for RelaxationPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_relaxation() {
        let relaxed = RelaxationPolicy::default().relax(&FilterCriteria::new("Drama", 90, 12.5));

        assert_eq!(relaxed.genre, "Drama");
        assert_eq!(relaxed.max_runtime, 120);
        assert_eq!(relaxed.min_popularity, 7.5);
    }

    #[test]
    fn test_popularity_never_drops_below_floor() {
        let policy = RelaxationPolicy::default();
        for min in [4.9, 0.0, -3.0, -1000.0] {
            let relaxed = policy.relax(&FilterCriteria::new("War", 100, min));
            assert_eq!(relaxed.min_popularity, 0.0, "min_popularity {min}");
        }
    }

    #[test]
    fn test_runtime_saturates() {
        let relaxed = RelaxationPolicy::default().relax(&FilterCriteria::new("War", Runtime::MAX, 1.0));
        assert_eq!(relaxed.max_runtime, Runtime::MAX);
    }

    #[test]
    fn test_custom_policy() {
        let policy = RelaxationPolicy::new()
            .with_runtime_step(15)
            .with_popularity_step(2.0)
            .with_popularity_floor(1.0);
        let relaxed = policy.relax(&FilterCriteria::new("Music", 100, 2.5));

        assert_eq!(relaxed.max_runtime, 115);
        assert_eq!(relaxed.min_popularity, 1.0);
    }
}
