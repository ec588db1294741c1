//! The shopping cart.
//!
//! The cart stores dish ids and quantities only. Prices are looked up in the
//! catalog at read time, so totals always reflect the catalog the session was
//! built with rather than a price captured at add time.

use menu_catalog::{DishId, MenuCatalog};
use serde::Serialize;

/// One dish in the cart with its quantity.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub dish_id: DishId,
    pub quantity: u32,
}

/// An ordered collection of cart lines. Insertion order is preserved.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of a dish, merging into an existing line if present.
    pub fn add(&mut self, dish_id: &str) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.dish_id == dish_id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                dish_id: dish_id.to_string(),
                quantity: 1,
            });
        }
    }

    /// Sets a line's quantity. Zero removes the line; a quantity for a dish
    /// not yet in the cart inserts a new line.
    pub fn set_quantity(&mut self, dish_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(dish_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.dish_id == dish_id) {
            line.quantity = quantity;
        } else {
            self.lines.push(CartLine {
                dish_id: dish_id.to_string(),
                quantity,
            });
        }
    }

    /// Removes a line entirely regardless of quantity.
    pub fn remove(&mut self, dish_id: &str) {
        self.lines.retain(|l| l.dish_id != dish_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of quantity times current catalog price. Lines whose dish is no
    /// longer in the catalog contribute nothing.
    pub fn total_price(&self, catalog: &MenuCatalog) -> f64 {
        self.lines
            .iter()
            .filter_map(|l| catalog.get(&l.dish_id).map(|d| d.price * f64::from(l.quantity)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_catalog::parse_menu;

    fn catalog() -> MenuCatalog {
        let json = r#"[
            {"id": "rice", "name": "米饭", "price": 3, "category": "主食"},
            {"id": "tomato-egg-soup", "name": "西红柿鸡蛋汤", "price": 12, "category": "汤品"}
        ]"#;
        MenuCatalog::new(parse_menu(json).unwrap())
    }

    #[test]
    fn add_merges_existing_lines() {
        let mut cart = Cart::new();
        cart.add("rice");
        cart.add("rice");
        cart.add("tomato-egg-soup");
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add("rice");
        cart.set_quantity("rice", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_inserts_missing_line() {
        let mut cart = Cart::new();
        cart.set_quantity("rice", 4);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn total_price_recomputes_from_catalog() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add("rice");
        cart.set_quantity("rice", 3);
        cart.add("tomato-egg-soup");
        assert!((cart.total_price(&catalog) - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_dish_contributes_nothing_to_total() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add("retired-dish");
        cart.add("rice");
        assert!((cart.total_price(&catalog) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add("rice");
        cart.add("tomato-egg-soup");
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }
}
