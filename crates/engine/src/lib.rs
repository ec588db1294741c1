//! Recommendation engine for the ordering assistant.
//!
//! This crate provides:
//! - [`PreferencePayload`]: the structured preference payload and its
//!   enumerated bands
//! - [`DishFilter`] and [`FilterPipeline`]: composable candidate filtering
//! - [`RuleBasedRecommender`]: the pure, deterministic strategy
//! - [`ModelAssistedRecommender`]: the external-model strategy with
//!   validation, top-up, and fixed-combo fallback
//!
//! ## Architecture
//! The two strategies are interchangeable implementations of one contract:
//! at most the requested number of dishes, every id present in the catalog,
//! no duplicates. The rule-based path is synchronous and pure; the
//! model-assisted path is async but never surfaces an error, degrading to
//! configured combos instead.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{PreferencePayload, RuleBasedRecommender, BudgetBand};
//!
//! let engine = RuleBasedRecommender::new(catalog.clone());
//! let prefs = PreferencePayload::default().with_budget(BudgetBand::Low);
//! let dishes = engine.recommend(&prefs)?;
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod model_assisted;
pub mod payload;
pub mod prompt;
pub mod ranking;
pub mod rule_based;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use model_assisted::{ComboConfig, ModelAssistedRecommender};
pub use payload::{BudgetBand, MealPurpose, NutritionFocus, PreferencePayload};
pub use rule_based::RuleBasedRecommender;
pub use traits::DishFilter;
