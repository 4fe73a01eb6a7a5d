//! Open WebUI (OpenAI-compatible) rewriter

use super::completion::{ChatCompletionRequest, CompletionText};
use super::{build_prompt, first_line, QueryRewriter, RewriteOutcome};
use crate::config::RewriterSettings;
use crate::network::{HttpClient, HttpRequest};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Rewriter backed by an OpenAI-compatible `/api/chat/completions` endpoint
pub struct OpenWebUiRewriter {
    client: HttpClient,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
}

impl OpenWebUiRewriter {
    pub fn new(client: HttpClient, settings: &RewriterSettings) -> Self {
        Self {
            client,
            url: settings.completions_url(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout: Duration::from_secs_f64(settings.timeout),
        }
    }

    fn request(&self, query: &str) -> anyhow::Result<HttpRequest> {
        let body = ChatCompletionRequest::user(&self.model, build_prompt(query))
            .max_tokens(self.max_tokens)
            .temperature(self.temperature);

        Ok(HttpRequest::post(&self.url)
            .bearer(&self.api_key)
            .json(serde_json::to_value(body)?))
    }

    /// Turn a raw response body into an outcome
    fn interpret(text: &str) -> RewriteOutcome {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => return RewriteOutcome::Failed(format!("body is not JSON: {}", e)),
        };

        match CompletionText::from_value(value) {
            CompletionText::Assistant(content) => match first_line(&content) {
                Some(line) => RewriteOutcome::Rewritten(line),
                None => RewriteOutcome::Failed("empty completion".to_string()),
            },
            CompletionText::Unrecognized(dump) => {
                RewriteOutcome::Failed(format!("unrecognized completion shape: {}", dump))
            }
        }
    }
}

#[async_trait]
impl QueryRewriter for OpenWebUiRewriter {
    fn name(&self) -> &str {
        "openwebui"
    }

    async fn rewrite(&self, query: &str) -> RewriteOutcome {
        let request = match self.request(query) {
            Ok(req) => req,
            Err(e) => return RewriteOutcome::Failed(format!("failed to build request: {}", e)),
        };

        let response = match self.client.execute(request, self.timeout).await {
            Ok(resp) => resp,
            Err(e) => return RewriteOutcome::Failed(e.to_string()),
        };

        if !response.is_success() {
            return RewriteOutcome::Failed(format!(
                "HTTP {}: {}",
                response.status,
                response.excerpt()
            ));
        }

        let outcome = Self::interpret(&response.text);
        debug!("{} rewrite of '{}': {:?}", self.name(), query, outcome);
        outcome
    }
}
