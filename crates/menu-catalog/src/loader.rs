//! Loader and normalization pass for menu data.
//!
//! The raw menu JSON is heterogeneous: ids and prices may be strings or
//! numbers, arrays may be missing entirely. This module coerces everything
//! into the canonical [`Dish`] shape exactly once at load time; nothing
//! downstream ever re-normalizes per request.

use crate::error::{CatalogError, Result};
use crate::types::{Category, Dish, DishId, Nutrition, Review};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// A JSON value that may arrive as a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    Number(f64),
    Text(String),
}

impl StringOrNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            StringOrNumber::Number(n) => Some(*n),
            StringOrNumber::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_string(&self) -> String {
        match self {
            // Integral ids like 12 must not render as "12.0"
            StringOrNumber::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            StringOrNumber::Number(n) => n.to_string(),
            StringOrNumber::Text(s) => s.trim().to_string(),
        }
    }
}

/// Raw dish record as it appears in the menu file, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDish {
    #[serde(default)]
    pub id: Option<StringOrNumber>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<StringOrNumber>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "spicyLevel")]
    pub spicy_level: Option<u8>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub nutrition: Option<RawNutrition>,
    #[serde(default)]
    pub reviews: Option<Vec<Review>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawNutrition {
    #[serde(default)]
    pub calories: f32,
    #[serde(default)]
    pub protein: f32,
    #[serde(default)]
    pub fat: f32,
    #[serde(default)]
    pub carbs: f32,
}

/// Normalize raw records into canonical dishes.
///
/// Data hygiene rules:
/// - records with no id or no name are dropped silently (debug log only)
/// - a duplicate id keeps the first record and drops the rest
/// - negative prices are clamped to zero
/// - missing arrays become empty, unknown categories become `Other`
pub fn normalize(raw: Vec<RawDish>) -> Vec<Dish> {
    let mut seen: HashSet<DishId> = HashSet::new();
    let mut dishes = Vec::with_capacity(raw.len());

    for record in raw {
        let Some(id) = record.id.as_ref().map(|v| v.as_string()) else {
            debug!("Dropping menu record with no id");
            continue;
        };
        if id.is_empty() {
            debug!("Dropping menu record with empty id");
            continue;
        }
        let Some(name) = record.name.filter(|n| !n.trim().is_empty()) else {
            debug!(%id, "Dropping menu record with no name");
            continue;
        };
        if !seen.insert(id.clone()) {
            debug!(%id, "Dropping menu record with duplicate id");
            continue;
        }

        let price = record
            .price
            .as_ref()
            .and_then(|p| p.as_f64())
            .unwrap_or(0.0)
            .max(0.0);

        dishes.push(Dish {
            id,
            name,
            description: record.description.unwrap_or_default(),
            price,
            category: record
                .category
                .as_deref()
                .map(Category::parse)
                .unwrap_or(Category::Other),
            spicy_level: record.spicy_level.unwrap_or(0).min(2),
            ingredients: record.ingredients.unwrap_or_default(),
            nutrition: record.nutrition.map(|n| Nutrition {
                calories: n.calories.max(0.0),
                protein: n.protein.max(0.0),
                fat: n.fat.max(0.0),
                carbs: n.carbs.max(0.0),
            }),
            reviews: record.reviews.unwrap_or_default(),
        });
    }

    dishes
}

/// Parse a JSON array of raw dish records and normalize it.
pub fn parse_menu(json: &str) -> Result<Vec<Dish>> {
    let raw: Vec<RawDish> = serde_json::from_str(json)?;
    Ok(normalize(raw))
}

/// Read and normalize a menu file.
pub fn load_menu(path: &Path) -> Result<Vec<Dish>> {
    let file = File::open(path)?;
    let raw: Vec<RawDish> = serde_json::from_reader(BufReader::new(file))?;
    let dishes = normalize(raw);
    if dishes.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }
    Ok(dishes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_coercion_from_string() {
        let dishes = parse_menu(
            r#"[{"id": "rice", "name": "米饭", "price": "3.5", "category": "主食"}]"#,
        )
        .unwrap();
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].price, 3.5);
        assert_eq!(dishes[0].category, Category::Staple);
    }

    #[test]
    fn test_numeric_id_coercion() {
        let dishes =
            parse_menu(r#"[{"id": 12, "name": "可乐", "price": 6, "category": "饮品"}]"#).unwrap();
        assert_eq!(dishes[0].id, "12");
    }

    #[test]
    fn test_records_without_id_or_name_are_dropped() {
        let dishes = parse_menu(
            r#"[
                {"name": "无名菜", "price": 10},
                {"id": "nameless", "price": 10},
                {"id": "ok", "name": "好菜", "price": 10}
            ]"#,
        )
        .unwrap();
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].id, "ok");
    }

    #[test]
    fn test_duplicate_id_keeps_first_record() {
        let dishes = parse_menu(
            r#"[
                {"id": "rice", "name": "米饭", "price": 3},
                {"id": "rice", "name": "米饭二号", "price": 99}
            ]"#,
        )
        .unwrap();
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].name, "米饭");
        assert_eq!(dishes[0].price, 3.0);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let dishes = parse_menu(r#"[{"id": "x", "name": "菜"}]"#).unwrap();
        let d = &dishes[0];
        assert_eq!(d.price, 0.0);
        assert_eq!(d.category, Category::Other);
        assert_eq!(d.spicy_level, 0);
        assert!(d.ingredients.is_empty());
        assert!(d.nutrition.is_none());
    }

    #[test]
    fn test_spicy_level_clamped() {
        let dishes =
            parse_menu(r#"[{"id": "x", "name": "菜", "spicyLevel": 9}]"#).unwrap();
        assert_eq!(dishes[0].spicy_level, 2);
    }

    #[test]
    fn test_invalid_top_level_json_is_an_error() {
        assert!(parse_menu("not json").is_err());
    }
}
