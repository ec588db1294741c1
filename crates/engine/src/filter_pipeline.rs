//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::payload::PreferencePayload;
use crate::traits::DishFilter;
use anyhow::Result;
use menu_catalog::DishId;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(BudgetFilter::new(catalog.clone()))
///     .add_filter(SpiceFilter::new(catalog.clone()));
///
/// let filtered = pipeline.apply(candidates, &prefs)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn DishFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl DishFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the candidates.
    pub fn apply(
        &self,
        candidates: Vec<DishId>,
        prefs: &PreferencePayload,
    ) -> Result<Vec<DishId>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, prefs)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SpiceFilter;
    use crate::test_support::test_catalog;
    use std::sync::Arc;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let prefs = PreferencePayload::default();

        let candidates = vec!["rice".to_string(), "gongbao-chicken".to_string()];
        let filtered = pipeline.apply(candidates.clone(), &prefs).unwrap();
        assert_eq!(filtered, candidates);
    }

    #[test]
    fn test_single_filter() {
        let catalog = Arc::new(test_catalog());
        let pipeline = FilterPipeline::new().add_filter(SpiceFilter::new(catalog));

        let prefs = PreferencePayload::default().with_spicy_tolerance(0);
        let candidates = vec!["rice".to_string(), "gongbao-chicken".to_string()];

        let filtered = pipeline.apply(candidates, &prefs).unwrap();
        assert_eq!(filtered, vec!["rice".to_string()]);
    }
}
