//! Core domain types for the restaurant menu.
//!
//! This module defines the fundamental data structures used throughout the
//! system: dishes, categories, nutrition facts, and reviews.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique, stable identifier for a dish. Used as the foreign key everywhere
/// (cart lines, recommendation results, model output).
pub type DishId = String;

// =============================================================================
// Category
// =============================================================================

/// Menu categories.
///
/// The menu data uses Chinese labels for categories; each variant maps
/// bidirectionally to its native label via [`Category::label`] and
/// [`Category::parse`]. Labels the parser does not recognize map to
/// `Other` rather than failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    HotDish,
    StirFry,
    Steamed,
    Soup,
    Staple,
    Burger,
    Drink,
    Snack,
    Dessert,
    Side,
    Steak,
    Salad,
    Pizza,
    Pasta,
    Upgrade,
    Other,
}

impl Category {
    /// Native menu label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::HotDish => "热菜",
            Category::StirFry => "小炒",
            Category::Steamed => "蒸菜",
            Category::Soup => "汤品",
            Category::Staple => "主食",
            Category::Burger => "汉堡",
            Category::Drink => "饮品",
            Category::Snack => "小食",
            Category::Dessert => "甜品",
            Category::Side => "配菜",
            Category::Steak => "牛排",
            Category::Salad => "沙拉",
            Category::Pizza => "披萨",
            Category::Pasta => "意面",
            Category::Upgrade => "加价升级",
            Category::Other => "其他",
        }
    }

    /// Parse a native menu label. Unknown labels become `Other`.
    pub fn parse(s: &str) -> Category {
        match s.trim() {
            "热菜" => Category::HotDish,
            "小炒" => Category::StirFry,
            "蒸菜" => Category::Steamed,
            "汤品" => Category::Soup,
            "主食" => Category::Staple,
            "汉堡" => Category::Burger,
            "饮品" => Category::Drink,
            "小食" => Category::Snack,
            "甜品" => Category::Dessert,
            "配菜" => Category::Side,
            "牛排" => Category::Steak,
            "沙拉" => Category::Salad,
            "披萨" => Category::Pizza,
            "意面" => Category::Pasta,
            "加价升级" => Category::Upgrade,
            _ => Category::Other,
        }
    }

    /// Whether this category belongs to the Chinese side of the menu.
    /// Used by the conversation flow's initial cuisine question.
    pub fn is_chinese(&self) -> bool {
        matches!(
            self,
            Category::HotDish
                | Category::StirFry
                | Category::Steamed
                | Category::Soup
                | Category::Staple
        )
    }
}

// =============================================================================
// Nutrition & Reviews
// =============================================================================

/// Nutrition facts for a dish. All values are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f32,
    pub protein: f32,
    pub fat: f32,
    pub carbs: f32,
}

/// A customer review attached to a dish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub rating: f32,
    pub comment: String,
    pub author: String,
}

// =============================================================================
// Dish
// =============================================================================

/// A single orderable dish, fully normalized.
///
/// Instances are only ever produced by the loader's normalization pass;
/// after that the catalog is immutable for the life of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    pub description: String,
    /// Price in yuan. Non-negative after normalization.
    pub price: f64,
    pub category: Category,
    /// 0 = not spicy, 1 = mildly spicy, 2 = medium spicy.
    pub spicy_level: u8,
    pub ingredients: Vec<String>,
    pub nutrition: Option<Nutrition>,
    pub reviews: Vec<Review>,
}

impl Dish {
    /// Human-readable spice label, as shown to the model and the user.
    pub fn spice_label(&self) -> &'static str {
        match self.spicy_level {
            0 => "不辣",
            1 => "微辣",
            _ => "中辣",
        }
    }

    /// Human-readable nutrition summary for prompt listings.
    pub fn nutrition_summary(&self) -> String {
        match &self.nutrition {
            Some(n) => format!(
                "热量{}卡, 蛋白质{}g, 脂肪{}g, 碳水{}g",
                n.calories, n.protein, n.fat, n.carbs
            ),
            None => "营养信息暂无".to_string(),
        }
    }

    /// Protein content, zero when nutrition data is missing.
    pub fn protein(&self) -> f32 {
        self.nutrition.map(|n| n.protein).unwrap_or(0.0)
    }
}
