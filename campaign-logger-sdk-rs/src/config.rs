use crate::prompts;
use serde::Deserialize;
use std::env;

/// One rule for deciding that a message should open the dialog.
///
/// Rules are compared against text that is already lower-cased and trimmed.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "match", content = "value", rename_all = "snake_case")]
pub enum Trigger {
    Exact(String),
    Contains(String),
}

impl Trigger {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Trigger::Exact(expected) => text == expected,
            Trigger::Contains(needle) => text.contains(needle.as_str()),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct TriggerSet(Vec<Trigger>);

impl TriggerSet {
    pub fn push(&mut self, trigger: Trigger) {
        self.0.push(trigger);
    }

    pub fn matches(&self, text: &str) -> bool {
        self.0.iter().any(|t| t.matches(text))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TriggerSet {
    fn default() -> Self {
        Self(vec![
            Trigger::Exact("hi".to_string()),
            Trigger::Exact("hello".to_string()),
            Trigger::Exact("/positive".to_string()),
            Trigger::Exact("/pos".to_string()),
            Trigger::Contains("positive".to_string()),
        ])
    }
}

/// Texts and triggers the router answers with.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BotConfig {
    pub welcome_message: String,
    pub fallback_prompt: String,
    pub cancelled_message: String,
    pub diagnostic_message: String,
    pub action_received_message: String,
    pub dialog_fallback_text: String,
    pub triggers: TriggerSet,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            welcome_message: prompts::WELCOME_MESSAGE.to_string(),
            fallback_prompt: prompts::FALLBACK_PROMPT.to_string(),
            cancelled_message: prompts::CANCELLED_MESSAGE.to_string(),
            diagnostic_message: prompts::DIAGNOSTIC_MESSAGE.to_string(),
            action_received_message: prompts::ACTION_RECEIVED_MESSAGE.to_string(),
            dialog_fallback_text: prompts::DIALOG_FALLBACK_TEXT.to_string(),
            triggers: TriggerSet::default(),
        }
    }
}

impl BotConfig {
    /// Defaults plus any extra triggers from the environment.
    ///
    /// `EXTRA_TRIGGERS` adds comma-separated exact matches and
    /// `EXTRA_TRIGGER_SUBSTRINGS` adds comma-separated substring matches.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.extend_triggers(
            env::var("EXTRA_TRIGGERS").ok().as_deref(),
            env::var("EXTRA_TRIGGER_SUBSTRINGS").ok().as_deref(),
        );
        config
    }

    fn extend_triggers(&mut self, exact: Option<&str>, substrings: Option<&str>) {
        for word in split_list(exact) {
            self.triggers.push(Trigger::Exact(word));
        }
        for word in split_list(substrings) {
            self.triggers.push(Trigger::Contains(word));
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
