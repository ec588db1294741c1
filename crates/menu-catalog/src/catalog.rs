//! The immutable, indexed menu catalog.
//!
//! Built once at startup from normalized dishes and never mutated afterward.
//! Load order is preserved: "catalog order" is the stable tie-break used by
//! the recommendation engine's ranking.

use crate::error::Result;
use crate::loader;
use crate::types::{Category, Dish, DishId};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Read-only view of the available dishes with O(1) id lookups and a
/// category index.
#[derive(Debug)]
pub struct MenuCatalog {
    /// Dishes in load order.
    dishes: Vec<Dish>,
    /// Dish id -> position in `dishes`.
    by_id: HashMap<DishId, usize>,
    /// Dishes grouped by category, in load order.
    by_category: HashMap<Category, Vec<DishId>>,
}

impl MenuCatalog {
    /// Build a catalog from normalized dishes.
    ///
    /// Callers normally go through [`MenuCatalog::load_from_file`]; this
    /// constructor exists so tests can build small in-memory catalogs.
    pub fn new(dishes: Vec<Dish>) -> Self {
        let mut by_id = HashMap::with_capacity(dishes.len());
        let mut by_category: HashMap<Category, Vec<DishId>> = HashMap::new();

        for (idx, dish) in dishes.iter().enumerate() {
            by_id.insert(dish.id.clone(), idx);
            by_category
                .entry(dish.category)
                .or_default()
                .push(dish.id.clone());
        }

        Self {
            dishes,
            by_id,
            by_category,
        }
    }

    /// Load, normalize, and index a menu file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let dishes = loader::load_menu(path)?;
        info!("Loaded {} dishes from {:?}", dishes.len(), path);
        Ok(Self::new(dishes))
    }

    /// Look up a dish by id.
    pub fn get(&self, id: &str) -> Option<&Dish> {
        self.by_id.get(id).map(|&idx| &self.dishes[idx])
    }

    /// Whether the catalog contains a dish with this id.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All dishes in load order.
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Ids of all dishes in a category, in load order.
    pub fn ids_in_category(&self, category: Category) -> &[DishId] {
        self.by_category
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: &str, category: Category) -> Dish {
        Dish {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            price: 10.0,
            category,
            spicy_level: 0,
            ingredients: Vec::new(),
            nutrition: None,
            reviews: Vec::new(),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = MenuCatalog::new(vec![
            dish("rice", Category::Staple),
            dish("soup", Category::Soup),
        ]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("rice"));
        assert!(!catalog.contains("pizza"));
        assert_eq!(catalog.get("soup").unwrap().category, Category::Soup);
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_category_index_preserves_load_order() {
        let catalog = MenuCatalog::new(vec![
            dish("a", Category::Soup),
            dish("b", Category::Staple),
            dish("c", Category::Soup),
        ]);
        assert_eq!(catalog.ids_in_category(Category::Soup), ["a", "c"]);
        assert!(catalog.ids_in_category(Category::Pizza).is_empty());
    }

    #[test]
    fn test_dishes_keep_load_order() {
        let catalog = MenuCatalog::new(vec![
            dish("z", Category::Soup),
            dish("a", Category::Soup),
        ]);
        let ids: Vec<_> = catalog.dishes().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["z", "a"]);
    }
}
