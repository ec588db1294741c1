//! Prompt construction for the model-assisted strategy.
//!
//! The selection call gets one prompt with two parts: the complete catalog
//! as a compact structured listing, and the user's requirements translated
//! into human-readable labels. The output contract is strict: a JSON array
//! of catalog ids, nothing else.

use crate::payload::PreferencePayload;
use menu_catalog::{Dish, MenuCatalog};
use serde_json::json;

/// System instruction for the selection call.
pub const SELECTION_SYSTEM_PROMPT: &str = "你是一位专业的餐厅推荐师，精通营养搭配和菜品推荐。\
你必须严格按照用户要求返回菜品ID的JSON数组，不能返回菜单中不存在的ID。";

/// One dish as the compact JSON object shown to the model, with
/// human-readable category, spice, and nutrition labels.
pub fn dish_listing_entry(dish: &Dish) -> serde_json::Value {
    json!({
        "id": dish.id,
        "name": dish.name,
        "description": dish.description,
        "price": dish.price,
        "category": dish.category.label(),
        "spicyLevel": dish.spice_label(),
        "ingredients": dish.ingredients.join(", "),
        "nutrition": dish.nutrition_summary(),
    })
}

/// Compact catalog listing embedded in the selection prompt: one JSON
/// object per dish with human-readable spice and nutrition fields.
pub fn menu_listing(catalog: &MenuCatalog) -> String {
    let entries: Vec<serde_json::Value> =
        catalog.dishes().iter().map(dish_listing_entry).collect();
    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
}

fn spice_tolerance_label(tolerance: Option<u8>) -> &'static str {
    match tolerance {
        None => "不限辣度",
        Some(0) => "不能吃辣",
        Some(1) => "能吃微辣",
        Some(_) => "能吃中辣",
    }
}

fn joined_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// Requirements block of the selection prompt, one labeled line per field.
pub fn requirement_labels(prefs: &PreferencePayload) -> String {
    format!(
        "- 预算范围：{}\n\
         - 菜系偏好：{}\n\
         - 辣度承受：{}\n\
         - 饮食忌口：{}\n\
         - 偏好食材：{}\n\
         - 营养关注：{}\n\
         - 用餐目的：{}\n\
         - 推荐数量：{}道",
        prefs
            .budget_range
            .map(|b| b.label())
            .unwrap_or("不限"),
        joined_or(&prefs.cuisine_preference, "无特殊偏好"),
        spice_tolerance_label(prefs.spicy_tolerance),
        joined_or(&prefs.dietary_restrictions, "无忌口"),
        joined_or(&prefs.preferred_ingredients, "无特殊偏好"),
        prefs.nutrition_focus.label(),
        prefs.meal_purpose.map(|p| p.label()).unwrap_or("正餐"),
        prefs.count()
    )
}

/// The full selection prompt for one recommendation request.
pub fn selection_prompt(catalog: &MenuCatalog, prefs: &PreferencePayload) -> String {
    format!(
        "你是一位专业的餐厅推荐师，需要根据用户需求从菜单中智能推荐合适的菜品。\n\n\
         用户需求：\n{}\n\n\
         可选菜单（JSON格式）：\n{}\n\n\
         请根据用户需求，从菜单中智能推荐最合适的菜品。推荐时请考虑：\n\
         1. 营养搭配均衡（主食、菜品、汤品等）\n\
         2. 口味层次丰富（不要都是同一种口味）\n\
         3. 价格合理搭配（有贵有便宜，性价比高）\n\
         4. 严格遵守用户的饮食限制和偏好\n\
         5. 推荐理由要具体且有说服力\n\n\
         请只返回推荐的菜品ID数组，格式为：[\"id1\", \"id2\", \"id3\", ...]\n\
         不要包含任何其他文字说明，只返回纯JSON数组。",
        requirement_labels(prefs),
        menu_listing(catalog)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{BudgetBand, NutritionFocus};
    use crate::test_support::test_catalog;

    #[test]
    fn test_menu_listing_covers_every_dish() {
        let catalog = test_catalog();
        let listing = menu_listing(&catalog);
        for dish in catalog.dishes() {
            assert!(listing.contains(&dish.id), "listing missing {}", dish.id);
        }
        assert!(listing.contains("营养信息暂无")); // mystery-dish has no data
    }

    #[test]
    fn test_requirement_labels_use_defaults_when_absent() {
        let labels = requirement_labels(&PreferencePayload::default());
        assert!(labels.contains("预算范围：不限"));
        assert!(labels.contains("辣度承受：不限辣度"));
        assert!(labels.contains("饮食忌口：无忌口"));
        assert!(labels.contains("推荐数量：6道"));
    }

    #[test]
    fn test_requirement_labels_render_set_fields() {
        let prefs = PreferencePayload::default()
            .with_budget(BudgetBand::Medium)
            .with_spicy_tolerance(1)
            .with_nutrition_focus(NutritionFocus::HighProtein)
            .with_count(4);
        let labels = requirement_labels(&prefs);
        assert!(labels.contains("预算范围：30-50"));
        assert!(labels.contains("辣度承受：能吃微辣"));
        assert!(labels.contains("营养关注：高蛋白"));
        assert!(labels.contains("推荐数量：4道"));
    }

    #[test]
    fn test_selection_prompt_contains_output_contract() {
        let prompt = selection_prompt(&test_catalog(), &PreferencePayload::default());
        assert!(prompt.contains("只返回纯JSON数组"));
    }
}
