//! Filter candidates by budget band.
//!
//! The three bands partition price space with no gaps or overlap:
//! Low < 20, 20 ≤ Medium ≤ 50, High > 50.

use crate::payload::PreferencePayload;
use crate::traits::DishFilter;
use anyhow::Result;
use menu_catalog::{DishId, MenuCatalog};
use std::sync::Arc;

/// Keeps candidates whose price falls inside the requested budget band.
/// No budget in the payload means no filtering.
pub struct BudgetFilter {
    catalog: Arc<MenuCatalog>,
}

impl BudgetFilter {
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        Self { catalog }
    }
}

impl DishFilter for BudgetFilter {
    fn name(&self) -> &str {
        "BudgetFilter"
    }

    fn apply(&self, candidates: Vec<DishId>, prefs: &PreferencePayload) -> Result<Vec<DishId>> {
        let Some(band) = prefs.budget_range else {
            return Ok(candidates);
        };

        let filtered = candidates
            .into_iter()
            .filter(|id| {
                self.catalog
                    .get(id)
                    .is_some_and(|dish| band.contains(dish.price))
            })
            .collect();

        Ok(filtered)
    }
}
