//! Filter candidates by nutrition focus.
//!
//! Dishes with no nutrition data are excluded under `high_protein` and
//! `low_calorie`: the filter fails closed rather than recommending a dish
//! whose macros are unknown.

use crate::payload::{NutritionFocus, PreferencePayload};
use crate::traits::DishFilter;
use anyhow::Result;
use menu_catalog::{DishId, MenuCatalog};
use std::sync::Arc;

const HIGH_PROTEIN_MIN_GRAMS: f32 = 20.0;
const LOW_CALORIE_MAX: f32 = 300.0;

/// Applies the requested nutrition focus; `balanced` and `no_preference`
/// pass everything through.
pub struct NutritionFilter {
    catalog: Arc<MenuCatalog>,
}

impl NutritionFilter {
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        Self { catalog }
    }
}

impl DishFilter for NutritionFilter {
    fn name(&self) -> &str {
        "NutritionFilter"
    }

    fn apply(&self, candidates: Vec<DishId>, prefs: &PreferencePayload) -> Result<Vec<DishId>> {
        let keep = |id: &DishId| -> bool {
            let Some(dish) = self.catalog.get(id) else {
                return false;
            };
            match prefs.nutrition_focus {
                NutritionFocus::HighProtein => dish
                    .nutrition
                    .is_some_and(|n| n.protein >= HIGH_PROTEIN_MIN_GRAMS),
                NutritionFocus::LowCalorie => dish
                    .nutrition
                    .is_some_and(|n| n.calories <= LOW_CALORIE_MAX),
                NutritionFocus::Balanced | NutritionFocus::NoPreference => true,
            }
        };

        if matches!(
            prefs.nutrition_focus,
            NutritionFocus::Balanced | NutritionFocus::NoPreference
        ) {
            return Ok(candidates);
        }

        Ok(candidates.into_iter().filter(|id| keep(id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{all_ids, test_catalog};

    #[test]
    fn test_high_protein_threshold() {
        let catalog = Arc::new(test_catalog());
        let filter = NutritionFilter::new(catalog.clone());
        let prefs =
            PreferencePayload::default().with_nutrition_focus(NutritionFocus::HighProtein);

        let filtered = filter.apply(all_ids(&catalog), &prefs).unwrap();
        assert_eq!(
            filtered,
            vec![
                "gongbao-chicken".to_string(), // 25g
                "hongshaorou-quail-eggs".to_string(), // 22g
                "beef-steak".to_string(), // 40g
            ]
        );
    }

    #[test]
    fn test_low_calorie_threshold() {
        let catalog = Arc::new(test_catalog());
        let filter = NutritionFilter::new(catalog.clone());
        let prefs =
            PreferencePayload::default().with_nutrition_focus(NutritionFocus::LowCalorie);

        let filtered = filter.apply(all_ids(&catalog), &prefs).unwrap();
        assert!(filtered.contains(&"tomato-egg-soup".to_string())); // 90 cal
        assert!(filtered.contains(&"rice".to_string())); // 230 cal
        assert!(!filtered.contains(&"gongbao-chicken".to_string())); // 420 cal
    }

    #[test]
    fn test_missing_nutrition_fails_closed() {
        let catalog = Arc::new(test_catalog());
        let filter = NutritionFilter::new(catalog.clone());

        for focus in [NutritionFocus::HighProtein, NutritionFocus::LowCalorie] {
            let prefs = PreferencePayload::default().with_nutrition_focus(focus);
            let filtered = filter.apply(all_ids(&catalog), &prefs).unwrap();
            assert!(
                !filtered.contains(&"mystery-dish".to_string()),
                "dish without nutrition data must be excluded under {:?}",
                focus
            );
        }
    }

    #[test]
    fn test_balanced_and_no_preference_pass_everything() {
        let catalog = Arc::new(test_catalog());
        let filter = NutritionFilter::new(catalog.clone());

        for focus in [NutritionFocus::Balanced, NutritionFocus::NoPreference] {
            let prefs = PreferencePayload::default().with_nutrition_focus(focus);
            let filtered = filter.apply(all_ids(&catalog), &prefs).unwrap();
            assert_eq!(filtered.len(), catalog.len());
        }
    }
}
