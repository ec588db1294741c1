//! The conversation orchestrator.
//!
//! [`ChatSession`] owns the transcript, the guided-flow state machine
//! (welcome, cuisine choice, budget choice, then free-form recommendations),
//! the user profile collected along the way, and the cart. Every interaction
//! appends exactly one user turn and one assistant turn, with a processing
//! flag raised strictly in between so the presentation layer can show a
//! typing indicator.

use std::sync::Arc;
use std::time::Duration;

use llm_client::CompletionService;
use menu_catalog::MenuCatalog;
use tracing::{debug, warn};

use crate::cart::Cart;
use crate::pipeline::{ChatOutcome, ChatPipeline};
use crate::turn::{self, ConversationTurn};

/// How long the assistant "thinks" before a scripted guided-flow reply.
const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(1500);

const GREETING: &str =
    "您好！欢迎光临！我是您的专属点餐助手。请问您今天想吃中餐还是西餐呢？";
const BUDGET_QUESTION: &str = "好的！请问您的用餐预算大概是多少呢？";
const DEGRADED_REPLY: &str = "抱歉，我现在遇到了一些技术问题。\
请稍后再试，或者告诉我您的具体需求，我会尽力帮助您！";

/// Where the guided flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Session created, greeting not yet shown.
    Welcome,
    /// Greeting shown, waiting for the cuisine choice.
    CuisinePreference,
    /// Cuisine chosen, waiting for the budget choice.
    Budget,
    /// Guided flow complete, free-form conversation from here on.
    Recommendations,
}

/// Cuisine direction chosen during the guided flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuisineStyle {
    Chinese,
    Western,
}

impl CuisineStyle {
    pub fn label(&self) -> &'static str {
        match self {
            CuisineStyle::Chinese => "中餐",
            CuisineStyle::Western => "西餐",
        }
    }
}

/// What the guided flow has learned about the user so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserProfile {
    pub cuisine: Option<CuisineStyle>,
    pub budget: Option<engine::BudgetBand>,
}

/// One user's conversation: transcript, guided-flow state, profile, and cart.
pub struct ChatSession {
    catalog: Arc<MenuCatalog>,
    pipeline: ChatPipeline,
    turns: Vec<ConversationTurn>,
    next_turn_id: u64,
    step: Step,
    profile: UserProfile,
    cart: Cart,
    processing: bool,
    thinking_delay: Duration,
}

impl ChatSession {
    pub fn new(catalog: Arc<MenuCatalog>, service: Arc<dyn CompletionService>) -> Self {
        Self {
            pipeline: ChatPipeline::new(Arc::clone(&catalog), service),
            catalog,
            turns: Vec::new(),
            next_turn_id: 1,
            step: Step::Welcome,
            profile: UserProfile::default(),
            cart: Cart::new(),
            processing: false,
            thinking_delay: DEFAULT_THINKING_DELAY,
        }
    }

    /// Overrides the scripted-reply thinking delay. Tests pass zero.
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    pub fn with_pipeline(mut self, pipeline: ChatPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    // -------------------------------------------------------------------------
    // Guided flow
    // -------------------------------------------------------------------------

    /// Opens the conversation: greeting plus the cuisine quick replies.
    ///
    /// Only valid from [`Step::Welcome`]; calling it again is a no-op.
    pub fn start(&mut self) {
        if self.step != Step::Welcome {
            return;
        }
        let id = self.next_id();
        self.turns.push(
            ConversationTurn::assistant(id, GREETING)
                .with_options(vec!["中餐".to_string(), "西餐".to_string()]),
        );
        self.step = Step::CuisinePreference;
    }

    /// Handles a quick-reply tap. Ignored outside the two option steps.
    pub async fn select_option(&mut self, option: &str) {
        match self.step {
            Step::CuisinePreference => self.select_cuisine(option).await,
            Step::Budget => self.select_budget(option).await,
            Step::Welcome | Step::Recommendations => {
                debug!(option, step = ?self.step, "option tap ignored at this step");
            }
        }
    }

    async fn select_cuisine(&mut self, option: &str) {
        let style = if option == "西餐" {
            CuisineStyle::Western
        } else {
            CuisineStyle::Chinese
        };
        self.push_user(format!("我选择：{option}"));
        self.profile.cuisine = Some(style);

        self.processing = true;
        tokio::time::sleep(self.thinking_delay).await;
        self.processing = false;

        let id = self.next_id();
        self.turns.push(
            ConversationTurn::assistant(id, BUDGET_QUESTION).with_options(vec![
                "10-30".to_string(),
                "30-50".to_string(),
                "50-100".to_string(),
            ]),
        );
        self.step = Step::Budget;
    }

    async fn select_budget(&mut self, option: &str) {
        self.push_user(format!("我选择：{option}元"));
        self.profile.budget = engine::BudgetBand::parse(option);

        let cuisine = self
            .profile
            .cuisine
            .map(|style| style.label())
            .unwrap_or("中餐");
        let request = format!("我想要{cuisine}，预算是{option}元，请为我推荐一些菜品");

        // History excludes the quick-reply turn: the synthesized request is
        // the user message the model sees for this exchange.
        let history = turn::history(&self.turns[..self.turns.len() - 1]);

        self.processing = true;
        let result = self.pipeline.handle_message(&request, &history).await;
        self.processing = false;

        match result {
            Ok(outcome) => {
                self.push_outcome(outcome);
                self.step = Step::Recommendations;
            }
            Err(error) => {
                warn!(%error, "budget-step recommendation failed");
                let id = self.next_id();
                self.turns.push(ConversationTurn::assistant(
                    id,
                    format!(
                        "好的，您选择了{option}元的预算！\
现在请告诉我您想要什么类型的菜品，我来为您推荐。"
                    ),
                ));
                // Stay on the budget step so a retry is possible.
            }
        }
    }

    /// Handles free-form user text. Blank input is ignored.
    pub async fn send_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.push_user(text);
        let history = turn::history(&self.turns[..self.turns.len() - 1]);

        self.processing = true;
        let result = self.pipeline.handle_message(text, &history).await;
        self.processing = false;

        match result {
            Ok(outcome) => {
                self.push_outcome(outcome);
                self.step = Step::Recommendations;
            }
            Err(error) => {
                warn!(%error, "chat exchange failed");
                let id = self.next_id();
                self.turns
                    .push(ConversationTurn::assistant(id, DEGRADED_REPLY));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Adds a dish to the cart and records a confirmation notice.
    ///
    /// Returns false (and changes nothing) when the id is not in the catalog.
    pub fn add_to_cart(&mut self, dish_id: &str) -> bool {
        let Some(dish) = self.catalog.get(dish_id) else {
            debug!(dish_id, "add_to_cart ignored unknown dish");
            return false;
        };
        let notice = format!("{} 已添加到购物车", dish.name);
        self.cart.add(dish_id);
        let id = self.next_id();
        self.turns.push(ConversationTurn::system(id, notice));
        true
    }

    pub fn set_cart_quantity(&mut self, dish_id: &str, quantity: u32) {
        self.cart.set_quantity(dish_id, quantity);
    }

    pub fn remove_from_cart(&mut self, dish_id: &str) {
        self.cart.remove(dish_id);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.total_price(&self.catalog)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn next_id(&mut self) -> u64 {
        let id = self.next_turn_id;
        self.next_turn_id += 1;
        id
    }

    fn push_user(&mut self, content: impl Into<String>) {
        let id = self.next_id();
        self.turns.push(ConversationTurn::user(id, content));
    }

    fn push_outcome(&mut self, outcome: ChatOutcome) {
        let id = self.next_id();
        let turn = match outcome {
            ChatOutcome::Conversation { content } => ConversationTurn::assistant(id, content),
            ChatOutcome::Recommendation { content, dishes } => {
                ConversationTurn::assistant(id, content).with_dishes(dishes)
            }
        };
        self.turns.push(turn);
    }
}
