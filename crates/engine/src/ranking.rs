//! Ranking heuristics for recommendation results.
//!
//! Two scores live here:
//! - the protein/price ratio used to order the deterministic strategy's
//!   final result
//! - the protein/sqrt(price) top-up score used to supplement an
//!   under-filled model-assisted result, a proxy for popularity in the
//!   absence of real ratings

use menu_catalog::{Dish, DishId, MenuCatalog};

/// Protein grams per yuan. Dishes with no nutrition data or a non-positive
/// price score zero and sort last.
pub fn protein_price_ratio(dish: &Dish) -> f64 {
    if dish.price <= 0.0 {
        return 0.0;
    }
    dish.protein() as f64 / dish.price
}

/// Top-up score: protein / sqrt(price), rewarding nutrition-dense,
/// lower-cost items. `None` for non-positive prices, which are invalid
/// data and excluded from top-up entirely.
pub fn top_up_score(dish: &Dish) -> Option<f64> {
    if dish.price <= 0.0 {
        return None;
    }
    Some(dish.protein() as f64 / dish.price.sqrt())
}

/// Order candidate ids by protein/price ratio descending.
///
/// The sort is stable, so candidates with equal scores keep their incoming
/// (catalog) order.
pub fn rank_by_protein_value(mut candidates: Vec<DishId>, catalog: &MenuCatalog) -> Vec<DishId> {
    candidates.sort_by(|a, b| {
        let score_a = catalog.get(a).map(protein_price_ratio).unwrap_or(0.0);
        let score_b = catalog.get(b).map(protein_price_ratio).unwrap_or(0.0);
        score_b
            .partial_cmp(&score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dish, test_catalog};
    use menu_catalog::{Category, Nutrition};

    #[test]
    fn test_protein_price_ratio() {
        let d = dish(
            "x",
            "x",
            25.0,
            Category::HotDish,
            0,
            &[],
            Some(Nutrition {
                calories: 100.0,
                protein: 50.0,
                fat: 0.0,
                carbs: 0.0,
            }),
        );
        assert_eq!(protein_price_ratio(&d), 2.0);
    }

    #[test]
    fn test_zero_price_scores_zero_not_infinity() {
        let d = dish("x", "x", 0.0, Category::HotDish, 0, &[], None);
        assert_eq!(protein_price_ratio(&d), 0.0);
        assert!(top_up_score(&d).is_none());
    }

    #[test]
    fn test_top_up_score_formula() {
        let d = dish(
            "x",
            "x",
            16.0,
            Category::HotDish,
            0,
            &[],
            Some(Nutrition {
                calories: 0.0,
                protein: 20.0,
                fat: 0.0,
                carbs: 0.0,
            }),
        );
        assert_eq!(top_up_score(&d), Some(5.0)); // 20 / sqrt(16)
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let catalog = test_catalog();
        // steamed-egg: 9/10 = 0.9, gongbao: 25/32 ≈ 0.78, rice: 4/3 ≈ 1.33
        let ranked = rank_by_protein_value(
            vec![
                "steamed-egg".to_string(),
                "gongbao-chicken".to_string(),
                "rice".to_string(),
            ],
            &catalog,
        );
        assert_eq!(
            ranked,
            vec![
                "rice".to_string(),
                "steamed-egg".to_string(),
                "gongbao-chicken".to_string(),
            ]
        );
    }

    #[test]
    fn test_equal_scores_keep_incoming_order() {
        let catalog = test_catalog();
        // mystery-dish has no nutrition data; an unknown id scores 0 too.
        let ranked = rank_by_protein_value(
            vec!["mystery-dish".to_string(), "no-such-dish".to_string()],
            &catalog,
        );
        assert_eq!(
            ranked,
            vec!["mystery-dish".to_string(), "no-such-dish".to_string()]
        );
    }
}
