//! The structured preference payload fed to the recommendation engine.
//!
//! The field names and enum values mirror the `recommend_menu` tool schema
//! the model is given, so a tool call's JSON arguments deserialize directly
//! into [`PreferencePayload`].

use menu_catalog::Category;
use serde::{Deserialize, Serialize};

// =============================================================================
// Enumerated preference bands
// =============================================================================

/// Budget band as presented to the user.
///
/// Filtering semantics intentionally partition price space with no gaps:
/// Low is price < 20, Medium is 20 ≤ price ≤ 50, High is price > 50.
/// A dish priced exactly 20 is Medium, not Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetBand {
    #[serde(rename = "10-30")]
    Low,
    #[serde(rename = "30-50")]
    Medium,
    #[serde(rename = "50-100")]
    High,
}

impl BudgetBand {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetBand::Low => "10-30",
            BudgetBand::Medium => "30-50",
            BudgetBand::High => "50-100",
        }
    }

    /// Parse the user-facing band label.
    pub fn parse(s: &str) -> Option<BudgetBand> {
        match s.trim() {
            "10-30" => Some(BudgetBand::Low),
            "30-50" => Some(BudgetBand::Medium),
            "50-100" => Some(BudgetBand::High),
            _ => None,
        }
    }

    /// Whether a price falls inside this band.
    pub fn contains(&self, price: f64) -> bool {
        match self {
            BudgetBand::Low => price < 20.0,
            BudgetBand::Medium => (20.0..=50.0).contains(&price),
            BudgetBand::High => price > 50.0,
        }
    }
}

/// Nutrition focus requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionFocus {
    HighProtein,
    LowCalorie,
    Balanced,
    #[default]
    NoPreference,
}

impl NutritionFocus {
    pub fn label(&self) -> &'static str {
        match self {
            NutritionFocus::HighProtein => "高蛋白",
            NutritionFocus::LowCalorie => "低卡路里",
            NutritionFocus::Balanced => "营养均衡",
            NutritionFocus::NoPreference => "无特殊要求",
        }
    }
}

/// What the meal is for. Carried through to the model prompt; the
/// deterministic strategy does not filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealPurpose {
    #[serde(rename = "正餐")]
    Regular,
    #[serde(rename = "小食")]
    Snack,
    #[serde(rename = "下午茶")]
    AfternoonTea,
    #[serde(rename = "夜宵")]
    LateNight,
    #[serde(rename = "聚餐")]
    Gathering,
    #[serde(rename = "工作餐")]
    WorkMeal,
    #[serde(rename = "健康餐")]
    HealthyMeal,
}

impl MealPurpose {
    pub fn label(&self) -> &'static str {
        match self {
            MealPurpose::Regular => "正餐",
            MealPurpose::Snack => "小食",
            MealPurpose::AfternoonTea => "下午茶",
            MealPurpose::LateNight => "夜宵",
            MealPurpose::Gathering => "聚餐",
            MealPurpose::WorkMeal => "工作餐",
            MealPurpose::HealthyMeal => "健康餐",
        }
    }
}

// =============================================================================
// PreferencePayload
// =============================================================================

fn default_count() -> usize {
    6
}

/// Structured preferences extracted from the conversation.
///
/// Every field is optional except the recommendation count, which always
/// has a default. Cuisine tags are kept as the raw category labels the
/// model produced; [`PreferencePayload::cuisine_categories`] resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencePayload {
    #[serde(default)]
    pub budget_range: Option<BudgetBand>,
    #[serde(default)]
    pub cuisine_preference: Vec<String>,
    #[serde(default)]
    pub spicy_tolerance: Option<u8>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub preferred_ingredients: Vec<String>,
    #[serde(default)]
    pub meal_purpose: Option<MealPurpose>,
    #[serde(default)]
    pub nutrition_focus: NutritionFocus,
    #[serde(default = "default_count")]
    pub number_of_recommendations: usize,
}

impl Default for PreferencePayload {
    fn default() -> Self {
        Self {
            budget_range: None,
            cuisine_preference: Vec::new(),
            spicy_tolerance: None,
            dietary_restrictions: Vec::new(),
            preferred_ingredients: Vec::new(),
            meal_purpose: None,
            nutrition_focus: NutritionFocus::NoPreference,
            number_of_recommendations: default_count(),
        }
    }
}

impl PreferencePayload {
    /// Parse the JSON arguments of a `recommend_menu` tool call.
    pub fn from_tool_args(args: &str) -> serde_json::Result<Self> {
        serde_json::from_str(args)
    }

    /// Requested result count, clamped to the 1–10 contract.
    pub fn count(&self) -> usize {
        self.number_of_recommendations.clamp(1, 10)
    }

    /// Cuisine tags resolved to catalog categories.
    pub fn cuisine_categories(&self) -> Vec<Category> {
        self.cuisine_preference
            .iter()
            .map(|s| Category::parse(s))
            .collect()
    }

    // Builder-style helpers for tests and the offline CLI path.

    pub fn with_budget(mut self, band: BudgetBand) -> Self {
        self.budget_range = Some(band);
        self
    }

    pub fn with_cuisine(mut self, labels: Vec<String>) -> Self {
        self.cuisine_preference = labels;
        self
    }

    pub fn with_spicy_tolerance(mut self, tolerance: u8) -> Self {
        self.spicy_tolerance = Some(tolerance);
        self
    }

    pub fn with_restrictions(mut self, terms: Vec<String>) -> Self {
        self.dietary_restrictions = terms;
        self
    }

    pub fn with_preferred_ingredients(mut self, terms: Vec<String>) -> Self {
        self.preferred_ingredients = terms;
        self
    }

    pub fn with_nutrition_focus(mut self, focus: NutritionFocus) -> Self {
        self.nutrition_focus = focus;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.number_of_recommendations = count;
        self
    }
}
