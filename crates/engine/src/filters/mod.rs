//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline. Applied in order they
//! realize the deterministic recommendation strategy: budget, cuisine,
//! spice, dietary restrictions, preferred ingredients, nutrition focus.

pub mod budget;
pub mod cuisine;
pub mod dietary;
pub mod ingredients;
pub mod nutrition;
pub mod spice;

// Re-export for convenience
pub use budget::BudgetFilter;
pub use cuisine::CuisineFilter;
pub use dietary::DietaryFilter;
pub use ingredients::IngredientFilter;
pub use nutrition::NutritionFilter;
pub use spice::SpiceFilter;
