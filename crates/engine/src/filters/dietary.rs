//! Filter candidates by dietary restrictions.
//!
//! A dish is dropped when any restricted term substring-matches any of its
//! ingredients, case-insensitively. Matching is conservative in exactly
//! that sense: a dish is excluded if and only if at least one term matches.

use crate::payload::PreferencePayload;
use crate::traits::DishFilter;
use anyhow::Result;
use menu_catalog::{Dish, DishId, MenuCatalog};
use std::sync::Arc;

/// Drops candidates containing any restricted ingredient term.
pub struct DietaryFilter {
    catalog: Arc<MenuCatalog>,
}

impl DietaryFilter {
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        Self { catalog }
    }
}

fn violates(dish: &Dish, terms: &[String]) -> bool {
    dish.ingredients.iter().any(|ingredient| {
        let ingredient = ingredient.to_lowercase();
        terms.iter().any(|term| ingredient.contains(term.as_str()))
    })
}

impl DishFilter for DietaryFilter {
    fn name(&self) -> &str {
        "DietaryFilter"
    }

    fn apply(&self, candidates: Vec<DishId>, prefs: &PreferencePayload) -> Result<Vec<DishId>> {
        let terms: Vec<String> = prefs
            .dietary_restrictions
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
                    .is_some_and(|dish| !violates(dish, &terms))
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
    fn test_restricted_term_drops_matching_dishes() {
        let catalog = Arc::new(test_catalog());
        let filter = DietaryFilter::new(catalog.clone());
        let prefs =
            PreferencePayload::default().with_restrictions(vec!["花生".to_string()]);

        let filtered = filter.apply(all_ids(&catalog), &prefs).unwrap();
        assert!(!filtered.contains(&"gongbao-chicken".to_string()));
        assert!(filtered.contains(&"rice".to_string()));
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let catalog = Arc::new(test_catalog());
        let filter = DietaryFilter::new(catalog.clone());
        // "tomato" must match the "Tomato" ingredient of garden-salad.
        let prefs =
            PreferencePayload::default().with_restrictions(vec!["tomato".to_string()]);

        let filtered = filter.apply(all_ids(&catalog), &prefs).unwrap();
        assert!(!filtered.contains(&"garden-salad".to_string()));
        // Chinese tomato dishes use "番茄" and are unaffected by "tomato".
        assert!(filtered.contains(&"tomato-egg-soup".to_string()));
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let catalog = Arc::new(test_catalog());
        let filter = DietaryFilter::new(catalog.clone());
        let prefs = PreferencePayload::default()
            .with_restrictions(vec!["  ".to_string(), String::new()]);

        let filtered = filter.apply(all_ids(&catalog), &prefs).unwrap();
        assert_eq!(filtered.len(), catalog.len());
    }
}
