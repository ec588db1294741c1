//! Shared fixtures for unit tests in this crate.

use menu_catalog::{Category, Dish, MenuCatalog, Nutrition};

pub fn dish(
    id: &str,
    name: &str,
    price: f64,
    category: Category,
    spicy_level: u8,
    ingredients: &[&str],
    nutrition: Option<Nutrition>,
) -> Dish {
    Dish {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        price,
        category,
        spicy_level,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        nutrition,
        reviews: Vec::new(),
    }
}

fn nutrition(calories: f32, protein: f32, fat: f32, carbs: f32) -> Option<Nutrition> {
    Some(Nutrition {
        calories,
        protein,
        fat,
        carbs,
    })
}

/// A small catalog covering every default combo id plus edge cases
/// (missing nutrition, English ingredients, all three budget bands).
pub fn test_catalog() -> MenuCatalog {
    MenuCatalog::new(vec![
        dish(
            "rice",
            "米饭",
            3.0,
            Category::Staple,
            0,
            &["大米"],
            nutrition(230.0, 4.0, 0.5, 50.0),
        ),
        dish(
            "tomato-egg-stirfry",
            "番茄炒蛋",
            18.0,
            Category::StirFry,
            0,
            &["番茄", "鸡蛋"],
            nutrition(180.0, 12.0, 10.0, 8.0),
        ),
        dish(
            "tomato-egg-soup",
            "番茄蛋汤",
            12.0,
            Category::Soup,
            0,
            &["番茄", "鸡蛋"],
            nutrition(90.0, 8.0, 4.0, 6.0),
        ),
        dish(
            "steamed-egg",
            "蒸水蛋",
            10.0,
            Category::Steamed,
            0,
            &["鸡蛋"],
            nutrition(120.0, 9.0, 7.0, 2.0),
        ),
        dish(
            "gongbao-chicken",
            "宫保鸡丁",
            32.0,
            Category::HotDish,
            1,
            &["鸡肉", "花生", "辣椒"],
            nutrition(420.0, 25.0, 22.0, 18.0),
        ),
        dish(
            "hongshaorou-quail-eggs",
            "红烧肉鹌鹑蛋",
            38.0,
            Category::HotDish,
            0,
            &["五花肉", "鹌鹑蛋"],
            nutrition(560.0, 22.0, 45.0, 12.0),
        ),
        dish(
            "beef-steak",
            "黑椒牛排",
            68.0,
            Category::Steak,
            0,
            &["牛肉", "黑椒"],
            nutrition(650.0, 40.0, 38.0, 20.0),
        ),
        dish(
            "garden-salad",
            "田园沙拉",
            25.0,
            Category::Salad,
            0,
            &["Lettuce", "Tomato", "Olive Oil"],
            nutrition(150.0, 5.0, 8.0, 15.0),
        ),
        dish(
            "mystery-dish",
            "神秘菜",
            20.0,
            Category::HotDish,
            2,
            &["秘制酱料"],
            None,
        ),
    ])
}

/// Id list of all catalog dishes in load order.
pub fn all_ids(catalog: &MenuCatalog) -> Vec<String> {
    catalog.dishes().iter().map(|d| d.id.clone()).collect()
}
