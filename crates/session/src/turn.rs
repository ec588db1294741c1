//! Conversation turns.
//!
//! A [`ConversationTurn`] is one entry in the visible transcript. Besides
//! plain text it can carry quick-reply options or a list of recommended
//! dishes, together with a [`RenderHint`] telling the presentation layer
//! which widget to attach below the bubble.

use llm_client::ChatMessage;
use menu_catalog::Dish;
use serde::Serialize;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Local notices (cart confirmations). Never sent to the model.
    System,
}

/// Widget the presentation layer should render with a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderHint {
    /// Render `options` as tappable quick replies.
    OptionsSelector,
    /// Render `dishes` as selectable dish cards.
    DishCards,
}

/// One entry in the session transcript.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    /// Monotonically increasing, unique within a session.
    pub id: u64,
    pub role: Role,
    pub content: String,
    /// Quick-reply choices, present when `render_hint` is `OptionsSelector`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Recommended dishes, present when `render_hint` is `DishCards`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dishes: Vec<Dish>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_hint: Option<RenderHint>,
}

impl ConversationTurn {
    pub fn user(id: u64, content: impl Into<String>) -> Self {
        Self::plain(id, Role::User, content)
    }

    pub fn assistant(id: u64, content: impl Into<String>) -> Self {
        Self::plain(id, Role::Assistant, content)
    }

    pub fn system(id: u64, content: impl Into<String>) -> Self {
        Self::plain(id, Role::System, content)
    }

    fn plain(id: u64, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            options: Vec::new(),
            dishes: Vec::new(),
            render_hint: None,
        }
    }

    /// Attaches quick-reply options and the matching render hint.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.render_hint = Some(RenderHint::OptionsSelector);
        self.options = options;
        self
    }

    /// Attaches recommended dishes and the matching render hint.
    pub fn with_dishes(mut self, dishes: Vec<Dish>) -> Self {
        self.render_hint = Some(RenderHint::DishCards);
        self.dishes = dishes;
        self
    }
}

/// Converts transcript turns into chat messages for the model.
///
/// System turns are local UI notices and are dropped.
pub fn history(turns: &[ConversationTurn]) -> Vec<ChatMessage> {
    turns
        .iter()
        .filter_map(|turn| match turn.role {
            Role::User => Some(ChatMessage::user(&turn.content)),
            Role::Assistant => Some(ChatMessage::assistant(&turn.content)),
            Role::System => None,
        })
        .collect()
}
