//! Filter candidates by spice tolerance.

use crate::payload::PreferencePayload;
use crate::traits::DishFilter;
use anyhow::Result;
use menu_catalog::{DishId, MenuCatalog};
use std::sync::Arc;

/// Keeps candidates whose spicy level does not exceed the user's tolerance.
/// An absent tolerance means no filtering.
pub struct SpiceFilter {
    catalog: Arc<MenuCatalog>,
}

impl SpiceFilter {
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        Self { catalog }
    }
}

impl DishFilter for SpiceFilter {
    fn name(&self) -> &str {
        "SpiceFilter"
    }

    fn apply(&self, candidates: Vec<DishId>, prefs: &PreferencePayload) -> Result<Vec<DishId>> {
        let Some(tolerance) = prefs.spicy_tolerance else {
            return Ok(candidates);
        };

        let filtered = candidates
            .into_iter()
            .filter(|id| {
                self.catalog
                    .get(id)
                    .is_some_and(|dish| dish.spicy_level <= tolerance)
            })
            .collect();

        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{all_ids, test_catalog};

    #[test]
    fn test_zero_tolerance_keeps_only_mild_dishes() {
        let catalog = Arc::new(test_catalog());
        let filter = SpiceFilter::new(catalog.clone());
        let prefs = PreferencePayload::default().with_spicy_tolerance(0);

        let filtered = filter.apply(all_ids(&catalog), &prefs).unwrap();
        assert!(!filtered.contains(&"gongbao-chicken".to_string())); // level 1
        assert!(!filtered.contains(&"mystery-dish".to_string())); // level 2
        assert!(filtered.contains(&"rice".to_string()));
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let catalog = Arc::new(test_catalog());
        let filter = SpiceFilter::new(catalog.clone());
        let prefs = PreferencePayload::default().with_spicy_tolerance(1);

        let filtered = filter.apply(all_ids(&catalog), &prefs).unwrap();
        assert!(filtered.contains(&"gongbao-chicken".to_string()));
        assert!(!filtered.contains(&"mystery-dish".to_string()));
    }

    #[test]
    fn test_absent_tolerance_passes_everything() {
        let catalog = Arc::new(test_catalog());
        let filter = SpiceFilter::new(catalog.clone());

        let filtered = filter
            .apply(all_ids(&catalog), &PreferencePayload::default())
            .unwrap();
        assert_eq!(filtered.len(), catalog.len());
    }
}
