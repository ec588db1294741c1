//! Conversation sessions for the ordering assistant.
//!
//! This crate ties the catalog, the recommendation engine, and the chat
//! completion boundary into a stateful [`ChatSession`]: the guided welcome
//! flow, free-form chat, and the cart.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use llm_client::OpenAiClient;
//! use menu_catalog::MenuCatalog;
//! use session::ChatSession;
//!
//! let catalog = Arc::new(MenuCatalog::load_from_file("data/menu.json")?);
//! let service = Arc::new(OpenAiClient::new(api_key));
//! let mut session = ChatSession::new(catalog, service);
//!
//! session.start();
//! session.select_option("中餐").await;
//! session.select_option("30-50").await;
//! for turn in session.turns() {
//!     println!("{:?}: {}", turn.role, turn.content);
//! }
//! ```

pub mod cart;
pub mod intent;
pub mod orchestrator;
pub mod pipeline;
pub mod turn;

pub use cart::{Cart, CartLine};
pub use intent::{IntentClassifier, KeywordIntentClassifier};
pub use orchestrator::{ChatSession, CuisineStyle, Step, UserProfile};
pub use pipeline::{ChatOutcome, ChatPipeline, recommend_menu_tool};
pub use turn::{ConversationTurn, RenderHint, Role};
