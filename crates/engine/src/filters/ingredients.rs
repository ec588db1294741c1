//! Filter candidates by preferred ingredients.

use crate::payload::PreferencePayload;
use crate::traits::DishFilter;
use anyhow::Result;
use menu_catalog::{Dish, DishId, MenuCatalog};
use std::sync::Arc;

/// Keeps candidates containing at least one preferred ingredient
/// (case-insensitive substring match). An empty preference set means
/// no filtering.
pub struct IngredientFilter {
    catalog: Arc<MenuCatalog>,
}

impl IngredientFilter {
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        Self { catalog }
    }
}

fn matches_any(dish: &Dish, terms: &[String]) -> bool {
    dish.ingredients.iter().any(|ingredient| {
        let ingredient = ingredient.to_lowercase();
        terms.iter().any(|term| ingredient.contains(term.as_str()))
    })
}

impl DishFilter for IngredientFilter {
    fn name(&self) -> &str {
        "IngredientFilter"
    }

    fn apply(&self, candidates: Vec<DishId>, prefs: &PreferencePayload) -> Result<Vec<DishId>> {
        let terms: Vec<String> = prefs
            .preferred_ingredients
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if terms.is_empty() {
            return Ok(candidates);
        }

        let filtered = candidates
            .into_iter()
            .filter(|id| {
                self.catalog
                    .get(id)
                    .is_some_and(|dish| matches_any(dish, &terms))
            })
            .collect();

        Ok(filtered)
    }
}
