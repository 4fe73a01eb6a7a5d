//! Query rewriting module
//!
//! Turns a free-form utterance ("Cari ramen enak di Jakarta") into a short
//! search phrase ("ramen Jakarta") using a chat completion service. Rewriting
//! is optional enrichment: every failure collapses into `RewriteOutcome::Failed`
//! and the caller falls back to the original query.

mod completion;
mod openwebui;

pub use completion::{ChatCompletionRequest, ChatMessage, CompletionText};
pub use openwebui::OpenWebUiRewriter;

use async_trait::async_trait;

/// Result of a rewrite attempt. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// A usable single-line search phrase
    Rewritten(String),
    /// The rewrite could not be used; the reason is for logs only
    Failed(String),
}

impl RewriteOutcome {
    /// The rewritten phrase, or `fallback` when the rewrite failed
    pub fn or_original(self, fallback: &str) -> String {
        match self {
            RewriteOutcome::Rewritten(text) => text,
            RewriteOutcome::Failed(_) => fallback.to_string(),
        }
    }
}

/// Something that can rewrite a query into a search phrase
#[async_trait]
pub trait QueryRewriter: Send + Sync {
    /// Rewriter name, used in logs
    fn name(&self) -> &str;

    /// Rewrite a non-empty, trimmed query
    async fn rewrite(&self, query: &str) -> RewriteOutcome;
}

/// Instruction sent to the model, asking for one Indonesian search line
pub fn build_prompt(query: &str) -> String {
    format!(
        "Ubah permintaan pengguna berikut menjadi kalimat pencarian singkat yang cocok \
         untuk Google Places (bahasa Indonesia). Hanya keluarkan satu baris teks.\n\n\
         User: {}\n\nOutput:",
        query
    )
}

/// Keep only the first line of a completion, trimmed
pub fn first_line(text: &str) -> Option<String> {
    let line = text.trim().lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
