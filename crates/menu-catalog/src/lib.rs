//! # Menu Catalog Crate
//!
//! This crate handles loading, normalizing, and indexing the restaurant menu.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Dish, Category, Nutrition, Review)
//! - **loader**: Lenient JSON parsing and the one-shot normalization pass
//! - **catalog**: The immutable [`MenuCatalog`] with id and category indices
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use menu_catalog::MenuCatalog;
//! use std::path::Path;
//!
//! let catalog = MenuCatalog::load_from_file(Path::new("data/menu.json"))?;
//!
//! let dish = catalog.get("rice").unwrap();
//! println!("{}: ¥{}", dish.name, dish.price);
//! ```
//!
//! The catalog is created once at startup and never mutated at runtime;
//! every component downstream shares it behind an `Arc`.

// Public modules
pub mod catalog;
pub mod error;
pub mod loader;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::MenuCatalog;
pub use error::{CatalogError, Result};
pub use loader::{RawDish, normalize, parse_menu};
pub use types::{Category, Dish, DishId, Nutrition, Review};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_then_index() {
        let dishes = parse_menu(
            r#"[
                {"id": "rice", "name": "米饭", "price": "3", "category": "主食"},
                {"id": "cola", "name": "可乐", "price": 6, "category": "饮品"},
                {"price": 99}
            ]"#,
        )
        .unwrap();
        let catalog = MenuCatalog::new(dishes);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("rice").unwrap().price, 3.0);
        assert_eq!(catalog.get("cola").unwrap().category, Category::Drink);
    }
}
