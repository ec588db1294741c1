//! Intent classification for incoming user text.
//!
//! Before a message goes to the model, the pipeline decides whether the user
//! is asking for dish recommendations. On a hit the recommendation tool call
//! is forced rather than left to the model's discretion, which keeps vague
//! requests like "来点清淡的" on the structured path instead of producing a
//! free-text answer that names no concrete dishes.

/// Decides whether a user message is asking for recommendations.
///
/// Behind a trait so the keyword matcher can be swapped for a learned
/// classifier without touching the pipeline.
pub trait IntentClassifier: Send + Sync {
    fn is_recommendation_request(&self, message: &str) -> bool;
}

/// Substring keyword matcher over food-ordering vocabulary.
///
/// Deliberately greedy: a false positive still produces a valid (if
/// unsolicited) recommendation, while a false negative loses the structured
/// dish cards entirely.
#[derive(Debug, Default)]
pub struct KeywordIntentClassifier;

/// Phrases that signal a recommendation request, matched as substrings.
const RECOMMENDATION_KEYWORDS: &[&str] = &[
    "推荐",
    "建议",
    "什么菜",
    "吃什么",
    "来点",
    "要点",
    "想要",
    "适合",
    "菜品",
    "菜单",
    "点菜",
    "中餐",
    "西餐",
    "热菜",
    "小炒",
    "汤品",
    "主食",
    "饮品",
    "需要",
    "健身",
    "高蛋白",
    "低卡",
    "营养",
    "清淡",
    "有什么",
    "给我",
];

impl KeywordIntentClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn is_recommendation_request(&self, message: &str) -> bool {
        RECOMMENDATION_KEYWORDS.iter().any(|kw| message.contains(kw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_recommendation_phrasings() {
        let classifier = KeywordIntentClassifier::new();
        for message in [
            "给我推荐几个菜",
            "今天吃什么好呢",
            "我想要高蛋白的",
            "健身餐有什么",
            "来点清淡的",
            "预算50，适合两个人的",
        ] {
            assert!(
                classifier.is_recommendation_request(message),
                "expected recommendation intent: {message}"
            );
        }
    }

    #[test]
    fn ignores_small_talk() {
        let classifier = KeywordIntentClassifier::new();
        for message in ["你好", "谢谢", "你们几点关门", "可以刷卡吗"] {
            assert!(
                !classifier.is_recommendation_request(message),
                "expected no recommendation intent: {message}"
            );
        }
    }

    #[test]
    fn keyword_appears_mid_sentence() {
        let classifier = KeywordIntentClassifier::new();
        assert!(classifier.is_recommendation_request("朋友说你们家菜单不错"));
    }
}
