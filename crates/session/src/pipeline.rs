//! The chat pipeline.
//!
//! One user message in, one [`ChatOutcome`] out. The pipeline makes the
//! dispatch call (persona prompt, history, the `recommend_menu` tool spec,
//! and a forced tool choice when the intent classifier fires), hands any
//! tool invocation to the recommendation engine, then makes a framing call
//! so the dish cards arrive with a natural sentence instead of raw data.

use std::sync::Arc;

use anyhow::{Context, Result};
use engine::{ComboConfig, ModelAssistedRecommender, PreferencePayload};
use llm_client::{ChatMessage, ChatRequest, CompletionService, ToolChoice, ToolSpec};
use menu_catalog::{Dish, MenuCatalog};
use serde_json::json;
use tracing::debug;

use crate::intent::{IntentClassifier, KeywordIntentClassifier};

/// Tool name the model invokes to request recommendations.
pub const RECOMMEND_TOOL_NAME: &str = "recommend_menu";

/// Persona and behavior rules for the dispatch call.
const ASSISTANT_SYSTEM_PROMPT: &str = "你是这个餐厅的AI点餐助手，专门为客户推荐合适的菜品。你的行为规范：

1. 服务态度：保持热心友好，具备丰富的饮食文化知识
2. 自我介绍：当客户问你是谁时，回答\"我是这个餐厅的点餐助手\"
3. 对话流程：
   - 如果是新客户（对话历史很少），首先询问客户想要吃中餐还是西餐
   - 接着询问客户的预算范围
   - 然后主动推荐菜品，不要一直询问客户的想法
4. 推荐策略：
   - 当客户需要推荐菜品时，你必须调用recommend_menu函数来展示菜品卡片
   - 你只能推荐菜单中现有的菜品，绝不能推荐菜单中不存在的菜品
   - 如果客户的需求无法用现有菜品满足，你必须诚实告知\"很抱歉，我们的菜单暂时没有符合您需求的菜品\"
   - 绝不能凭想象推荐不存在的菜品
5. 问答服务：当客户需要你解答问题时，提供详细、专业的回答
6. 基于上下文：利用完整的对话历史来给出个性化的回答

重要规则：
- 推荐菜品时必须调用recommend_menu函数，不能只在文字中描述菜品
- 只能推荐菜单中实际存在的菜品
- 如果没有合适的菜品，要诚实告知客户
回复时要热情友好，体现餐厅专业服务水平，使用中文。";

/// Honest reply when the engine finds nothing the user could order.
const NO_MATCH_REPLY: &str = "很抱歉，根据您的需求我们的菜单暂时没有合适的菜品推荐。\
请您换个要求试试，比如调整预算范围、辣度要求或者菜系偏好，我会尽力为您找到满意的菜品！";

/// Fallback framing when the model returns dishes without any text.
const DEFAULT_FRAMING: &str = "为您推荐以下菜品，请看看有没有喜欢的：";

/// Result of one pipeline pass over a user message.
#[derive(Debug)]
pub enum ChatOutcome {
    /// Plain conversational reply, no dish cards.
    Conversation { content: String },
    /// A recommendation reply: framing text plus the dishes to render as cards.
    Recommendation { content: String, dishes: Vec<Dish> },
}

/// Declares the `recommend_menu` tool with its argument schema.
pub fn recommend_menu_tool() -> ToolSpec {
    ToolSpec::function(
        RECOMMEND_TOOL_NAME,
        "基于用户的需求和偏好推荐合适的菜品",
        json!({
            "type": "object",
            "properties": {
                "budget_range": {
                    "type": "string",
                    "enum": ["10-30", "30-50", "50-100"],
                    "description": "预算范围：10-30元、30-50元、50-100元"
                },
                "cuisine_preference": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": ["热菜", "小炒", "蒸菜", "汤品", "主食", "汉堡", "饮品",
                                 "小食", "甜品", "配菜", "牛排", "沙拉", "披萨", "意面", "加价升级"]
                    },
                    "description": "菜系偏好"
                },
                "spicy_tolerance": {
                    "type": "number",
                    "minimum": 0,
                    "maximum": 2,
                    "description": "辣度承受能力：0(不辣), 1(微辣), 2(中辣)"
                },
                "dietary_restrictions": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "饮食限制或忌口食材"
                },
                "meal_purpose": {
                    "type": "string",
                    "enum": ["正餐", "小食", "下午茶", "夜宵", "聚餐", "工作餐", "健康餐"],
                    "description": "用餐目的"
                },
                "preferred_ingredients": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "偏好的食材"
                },
                "nutrition_focus": {
                    "type": "string",
                    "enum": ["high_protein", "low_calorie", "balanced", "no_preference"],
                    "description": "营养关注点"
                },
                "number_of_recommendations": {
                    "type": "number",
                    "minimum": 1,
                    "maximum": 10,
                    "default": 6,
                    "description": "推荐菜品数量"
                }
            },
            "required": ["number_of_recommendations"]
        }),
    )
}

/// Turns user messages into conversational replies or dish recommendations.
pub struct ChatPipeline {
    service: Arc<dyn CompletionService>,
    recommender: ModelAssistedRecommender,
    classifier: Box<dyn IntentClassifier>,
    model: String,
}

impl ChatPipeline {
    pub fn new(catalog: Arc<MenuCatalog>, service: Arc<dyn CompletionService>) -> Self {
        Self {
            recommender: ModelAssistedRecommender::new(catalog, Arc::clone(&service)),
            service,
            classifier: Box::new(KeywordIntentClassifier::new()),
            model: "gpt-4".to_string(),
        }
    }

    /// Overrides the model used for the dispatch, selection, and framing calls.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.recommender = self.recommender.with_model(model.clone());
        self.model = model;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_combos(mut self, combos: ComboConfig) -> Self {
        self.recommender = self.recommender.with_combos(combos);
        self
    }

    /// Runs one full pass: dispatch call, optional recommendation, framing call.
    ///
    /// `history` is the prior transcript; `message` is appended as the latest
    /// user turn. Errors cover transport failures and malformed tool
    /// arguments; the caller decides how to degrade.
    pub async fn handle_message(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<ChatOutcome> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(ASSISTANT_SYSTEM_PROMPT));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(message));

        let forced = self.classifier.is_recommendation_request(message);
        let choice = if forced {
            ToolChoice::Forced(RECOMMEND_TOOL_NAME.to_string())
        } else {
            ToolChoice::Auto
        };
        debug!(forced, "dispatching user message");

        let request = ChatRequest::new(&self.model, messages.clone())
            .with_tools(vec![recommend_menu_tool()], choice);
        let reply = self
            .service
            .complete(request)
            .await
            .context("dispatch call failed")?;

        let Some(call) = reply
            .tool_call()
            .filter(|c| c.function.name == RECOMMEND_TOOL_NAME)
        else {
            return Ok(ChatOutcome::Conversation {
                content: reply.text().to_string(),
            });
        };

        let prefs = PreferencePayload::from_tool_args(&call.function.arguments)
            .context("malformed recommend_menu arguments")?;
        let dishes = self.recommender.recommend(&prefs).await;
        if dishes.is_empty() {
            return Ok(ChatOutcome::Conversation {
                content: NO_MATCH_REPLY.to_string(),
            });
        }

        // Framing call: replay the tool exchange so the model can introduce
        // the dishes it is about to show.
        messages.push(ChatMessage::assistant_tool_calls(
            reply.content.clone(),
            reply.tool_calls.clone(),
        ));
        // The tool result carries the same human-readable listing shape the
        // selection prompt uses, so the model frames native labels, not
        // internal enum names.
        let listing: Vec<serde_json::Value> =
            dishes.iter().map(engine::prompt::dish_listing_entry).collect();
        messages.push(ChatMessage::tool_result(
            &call.id,
            serde_json::to_string(&listing).context("serializing recommendations")?,
        ));
        let framing = self
            .service
            .complete(ChatRequest::new(&self.model, messages).with_max_tokens(500))
            .await
            .context("framing call failed")?;

        let content = match framing.content {
            Some(text) if !text.trim().is_empty() => text,
            _ => DEFAULT_FRAMING.to_string(),
        };
        Ok(ChatOutcome::Recommendation { content, dishes })
    }
}
