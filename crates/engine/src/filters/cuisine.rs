//! Filter candidates by requested cuisine categories.

use crate::payload::PreferencePayload;
use crate::traits::DishFilter;
use anyhow::Result;
use menu_catalog::{DishId, MenuCatalog};
use std::sync::Arc;

/// Keeps candidates whose category is in the requested tag set.
/// An empty tag set means no filtering.
pub struct CuisineFilter {
    catalog: Arc<MenuCatalog>,
}

impl CuisineFilter {
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        Self { catalog }
    }
}

impl DishFilter for CuisineFilter {
    fn name(&self) -> &str {
        "CuisineFilter"
    }

    fn apply(&self, candidates: Vec<DishId>, prefs: &PreferencePayload) -> Result<Vec<DishId>> {
        if prefs.cuisine_preference.is_empty() {
            return Ok(candidates);
        }

        let wanted = prefs.cuisine_categories();
        let filtered = candidates
            .into_iter()
            .filter(|id| {
                self.catalog
                    .get(id)
                    .is_some_and(|dish| wanted.contains(&dish.category))
            })
            .collect();

        Ok(filtered)
    }
}
