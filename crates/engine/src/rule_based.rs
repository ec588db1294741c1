//! The deterministic, rule-based recommendation strategy.
//!
//! This is the pure core of the engine: the full catalog goes through the
//! filter pipeline (budget, cuisine, spice, dietary, ingredients,
//! nutrition), survivors are ranked by protein/price ratio with catalog
//! order as the stable tie-break, and the first `count` dishes come back.
//! It is synchronous, never touches the network, and is idempotent for a
//! fixed catalog and payload.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{
    BudgetFilter, CuisineFilter, DietaryFilter, IngredientFilter, NutritionFilter, SpiceFilter,
};
use crate::payload::PreferencePayload;
use crate::ranking;
use anyhow::Result;
use menu_catalog::{Dish, DishId, MenuCatalog};
use std::sync::Arc;
use tracing::debug;

/// Rule-based recommender over an immutable catalog.
pub struct RuleBasedRecommender {
    catalog: Arc<MenuCatalog>,
    pipeline: FilterPipeline,
}

impl RuleBasedRecommender {
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        let pipeline = FilterPipeline::new()
            .add_filter(BudgetFilter::new(catalog.clone()))
            .add_filter(CuisineFilter::new(catalog.clone()))
            .add_filter(SpiceFilter::new(catalog.clone()))
            .add_filter(DietaryFilter::new(catalog.clone()))
            .add_filter(IngredientFilter::new(catalog.clone()))
            .add_filter(NutritionFilter::new(catalog.clone()));
        Self { catalog, pipeline }
    }

    /// Recommend up to `prefs.count()` dishes matching the payload.
    ///
    /// Guarantees: at most the requested count, every id exists in the
    /// catalog, no duplicates.
    pub fn recommend(&self, prefs: &PreferencePayload) -> Result<Vec<Dish>> {
        let candidates: Vec<DishId> = self
            .catalog
            .dishes()
            .iter()
            .map(|d| d.id.clone())
            .collect();

        let filtered = self.pipeline.apply(candidates, prefs)?;
        debug!(
            "Rule-based filtering kept {} of {} dishes",
            filtered.len(),
            self.catalog.len()
        );

        let mut ranked = ranking::rank_by_protein_value(filtered, &self.catalog);
        ranked.truncate(prefs.count());

        Ok(ranked
            .into_iter()
            .filter_map(|id| self.catalog.get(&id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{BudgetBand, NutritionFocus};
    use crate::test_support::{dish, test_catalog};
    use menu_catalog::{Category, Nutrition};

    #[test]
    fn test_low_budget_scenario() {
        // Catalog {A: price 15, protein 10; B: price 45, protein 25},
        // low budget, one result => [A].
        let catalog = Arc::new(MenuCatalog::new(vec![
            dish(
                "A",
                "A",
                15.0,
                Category::HotDish,
                0,
                &[],
                Some(Nutrition {
                    calories: 100.0,
                    protein: 10.0,
                    fat: 0.0,
                    carbs: 0.0,
                }),
            ),
            dish(
                "B",
                "B",
                45.0,
                Category::HotDish,
                0,
                &[],
                Some(Nutrition {
                    calories: 100.0,
                    protein: 25.0,
                    fat: 0.0,
                    carbs: 0.0,
                }),
            ),
        ]));
        let engine = RuleBasedRecommender::new(catalog);
        let prefs = PreferencePayload::default()
            .with_budget(BudgetBand::Low)
            .with_count(1);

        let result = engine.recommend(&prefs).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "A");
    }

    #[test]
    fn test_result_bounded_by_count_with_no_duplicates() {
        let engine = RuleBasedRecommender::new(Arc::new(test_catalog()));
        let prefs = PreferencePayload::default().with_count(3);

        let result = engine.recommend(&prefs).unwrap();
        assert!(result.len() <= 3);
        let mut ids: Vec<_> = result.iter().map(|d| d.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), result.len());
    }

    #[test]
    fn test_is_idempotent() {
        let engine = RuleBasedRecommender::new(Arc::new(test_catalog()));
        let prefs = PreferencePayload::default()
            .with_budget(BudgetBand::Medium)
            .with_spicy_tolerance(1);

        let first: Vec<_> = engine
            .recommend(&prefs)
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        let second: Vec<_> = engine
            .recommend(&prefs)
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_combined_filters() {
        let engine = RuleBasedRecommender::new(Arc::new(test_catalog()));
        let prefs = PreferencePayload::default()
            .with_budget(BudgetBand::Medium)
            .with_nutrition_focus(NutritionFocus::HighProtein);

        let result = engine.recommend(&prefs).unwrap();
        let ids: Vec<_> = result.iter().map(|d| d.id.as_str()).collect();
        // Medium band: 20..=50. High protein: >= 20g. Ranked by protein/price:
        // gongbao 25/32 ≈ 0.78 beats hongshaorou 22/38 ≈ 0.58.
        assert_eq!(ids, vec!["gongbao-chicken", "hongshaorou-quail-eggs"]);
    }

    #[test]
    fn test_unsatisfiable_payload_yields_empty_result() {
        let engine = RuleBasedRecommender::new(Arc::new(test_catalog()));
        let prefs = PreferencePayload::default()
            .with_restrictions(vec!["鸡蛋".to_string()])
            .with_preferred_ingredients(vec!["鸡蛋".to_string()]);

        let result = engine.recommend(&prefs).unwrap();
        assert!(result.is_empty());
    }
}
