//! OpenAI-compatible chat completion wire types

use serde::{Deserialize, Serialize};

/// Body of a chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatCompletionRequest {
    /// Single user turn
    pub fn user(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: content.into(),
            }],
            max_tokens: 256,
            temperature: 0.0,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

/// What a completion body turned out to contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionText {
    /// `choices[0].message.content`
    Assistant(String),
    /// Any other JSON; carries the stringified body
    Unrecognized(String),
}

impl CompletionText {
    /// Validate a decoded body against the chat completion shape
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value::<ChatCompletion>(value.clone()) {
            Ok(completion) => match completion.choices.into_iter().next() {
                Some(choice) => CompletionText::Assistant(choice.message.content),
                None => CompletionText::Unrecognized(value.to_string()),
            },
            Err(_) => CompletionText::Unrecognized(value.to_string()),
        }
    }
}
