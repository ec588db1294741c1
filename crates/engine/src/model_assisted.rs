//! The model-assisted recommendation strategy.
//!
//! This strategy coordinates one external selection call and wraps it in
//! the three mandatory behaviors that hold no matter what the model does:
//! 1. Validation: every candidate id is checked against the catalog;
//!    unknown ids are dropped, duplicates removed, the rest truncated to
//!    the requested count.
//! 2. Top-up: an under-filled result from a received reply is supplemented
//!    from the catalog, excluding already-selected ids, ranked by
//!    protein/sqrt(price).
//! 3. Fallback: an unparsable reply substitutes the classic-combo id list
//!    (then topped up like any selection); a failed call short-circuits to
//!    the default-combo list, validated and truncated but never topped up.
//!    Either way the caller gets a normal result, never an error.

use crate::payload::PreferencePayload;
use crate::prompt;
use crate::ranking;
use llm_client::{ChatMessage, ChatRequest, CompletionError, CompletionService};
use menu_catalog::{Dish, DishId, MenuCatalog};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sample combo id lists used when the model's selection cannot be used.
///
/// These reference menu data, not structure, so they are configuration:
/// deployments with a different menu override them.
#[derive(Debug, Clone)]
pub struct ComboConfig {
    /// Substituted when the selection reply fails to parse as an id array.
    pub classic: Vec<DishId>,
    /// Substituted when the selection call fails outright. A balanced
    /// meat / vegetable / starch / soup / egg set.
    pub fallback: Vec<DishId>,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            classic: vec![
                "hongshaorou-quail-eggs".to_string(),
                "tomato-egg-stirfry".to_string(),
                "rice".to_string(),
                "tomato-egg-soup".to_string(),
            ],
            fallback: vec![
                "hongshaorou-quail-eggs".to_string(),
                "gongbao-chicken".to_string(),
                "tomato-egg-stirfry".to_string(),
                "rice".to_string(),
                "tomato-egg-soup".to_string(),
                "steamed-egg".to_string(),
            ],
        }
    }
}

/// Recommender that delegates dish selection to the completion service.
pub struct ModelAssistedRecommender {
    catalog: Arc<MenuCatalog>,
    service: Arc<dyn CompletionService>,
    combos: ComboConfig,
    model: String,
}

impl ModelAssistedRecommender {
    pub fn new(catalog: Arc<MenuCatalog>, service: Arc<dyn CompletionService>) -> Self {
        Self {
            catalog,
            service,
            combos: ComboConfig::default(),
            model: "gpt-4".to_string(),
        }
    }

    pub fn with_combos(mut self, combos: ComboConfig) -> Self {
        self.combos = combos;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Produce up to `prefs.count()` recommendations.
    ///
    /// Never fails: a dead or misbehaving model degrades to the configured
    /// combos. A failed call returns exactly the default combo filtered to
    /// the catalog and truncated, with no top-up; only a reply that was
    /// actually received (valid selection or classic-combo substitute) is
    /// topped up when under-filled.
    pub async fn recommend(&self, prefs: &PreferencePayload) -> Vec<Dish> {
        let count = prefs.count();

        let candidates = match self.select_candidates(prefs).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Selection call failed, using default combo: {}", e);
                let chosen = self.validate(self.combos.fallback.clone(), count);
                return self.resolve(chosen);
            }
        };

        let mut chosen = self.validate(candidates, count);
        self.top_up(&mut chosen, count);
        self.resolve(chosen)
    }

    /// Stage 1: ask the model for an id array.
    ///
    /// A parse failure is not an error; it substitutes the classic combo
    /// and continues normally.
    async fn select_candidates(
        &self,
        prefs: &PreferencePayload,
    ) -> Result<Vec<DishId>, CompletionError> {
        let request = ChatRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(prompt::SELECTION_SYSTEM_PROMPT),
                ChatMessage::user(prompt::selection_prompt(&self.catalog, prefs)),
            ],
        )
        .with_max_tokens(500);

        let reply = self.service.complete(request).await?;
        match parse_id_array(reply.text()) {
            Some(ids) => {
                debug!("Model selected {} candidate ids", ids.len());
                Ok(ids)
            }
            None => {
                warn!("Selection reply was not a JSON id array, using classic combo");
                Ok(self.combos.classic.clone())
            }
        }
    }

    /// Stage 2: enforce the catalog contract on raw candidates.
    fn validate(&self, candidates: Vec<DishId>, count: usize) -> Vec<DishId> {
        let mut seen: HashSet<DishId> = HashSet::new();
        let mut valid = Vec::new();
        for id in candidates {
            if valid.len() == count {
                break;
            }
            if self.catalog.contains(&id) && seen.insert(id.clone()) {
                valid.push(id);
            }
        }
        valid
    }

    /// Stage 3: fill an under-filled result from the catalog, best
    /// protein/sqrt(price) first, never re-adding a selected id.
    fn top_up(&self, chosen: &mut Vec<DishId>, count: usize) {
        if chosen.len() >= count {
            return;
        }

        let selected: HashSet<&DishId> = chosen.iter().collect();
        let mut extras: Vec<(&Dish, f64)> = self
            .catalog
            .dishes()
            .iter()
            .filter(|dish| !selected.contains(&dish.id))
            .filter_map(|dish| ranking::top_up_score(dish).map(|score| (dish, score)))
            .collect();
        extras.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let missing = count - chosen.len();
        chosen.extend(
            extras
                .into_iter()
                .take(missing)
                .map(|(dish, _)| dish.id.clone()),
        );
    }

    fn resolve(&self, ids: Vec<DishId>) -> Vec<Dish> {
        ids.into_iter()
            .filter_map(|id| self.catalog.get(&id).cloned())
            .collect()
    }
}

/// Parse the model's selection reply as a JSON array of dish ids.
///
/// Code fences and surrounding prose are tolerated; the first bracketed
/// span is tried as JSON. Anything else yields `None`.
fn parse_id_array(text: &str) -> Option<Vec<DishId>> {
    let trimmed = text.trim();
    let candidate = if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
        if start < end { &trimmed[start..=end] } else { trimmed }
    } else {
        trimmed
    };
    serde_json::from_str::<Vec<DishId>>(candidate).ok()
}
