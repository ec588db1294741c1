//! Core traits for the filtering pipeline.
//!
//! This module defines the DishFilter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use anyhow::Result;
use menu_catalog::DishId;

use crate::payload::PreferencePayload;

/// Core trait for filtering candidate dishes.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters take ownership of the `Vec<DishId>` and return a filtered Vec
/// - Filters must preserve the relative order of surviving candidates;
///   catalog order is the ranking tie-break downstream
/// - A filter whose preference is absent from the payload passes all
///   candidates through unchanged
pub trait DishFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidate dish ids.
    fn apply(&self, candidates: Vec<DishId>, prefs: &PreferencePayload) -> Result<Vec<DishId>>;
}
