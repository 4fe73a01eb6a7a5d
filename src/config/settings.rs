//! Settings structures for Places-Relay configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub rewriter: RewriterSettings,
    pub google: GoogleSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("OPENWEBUI_URL") {
            self.rewriter.base_url = val;
        }
        if let Ok(val) = std::env::var("OPENWEBUI_API_KEY") {
            self.rewriter.api_key = val;
        }
        if let Ok(val) = std::env::var("GOOGLE_API_KEY") {
            self.google.api_key = val;
        }
        if let Ok(val) = std::env::var("PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PLACES_RELAY_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }

    /// Reject settings the relay cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.google.api_key.trim().is_empty() {
            bail!("Missing Google API key: set GOOGLE_API_KEY or google.api_key");
        }
        if self.server.limiter
            && (self.server.search_per_minute == 0 || self.server.default_per_minute == 0)
        {
            bail!("Rate limiter quotas must be greater than zero");
        }
        for timeout in [self.rewriter.timeout, self.google.search_timeout] {
            if !(timeout.is_finite() && timeout > 0.0) {
                bail!("Outbound timeouts must be positive, finite seconds");
            }
        }
        Ok(())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Enable the per-client rate limiter
    pub limiter: bool,
    /// Allowed `/search` calls per client per minute
    pub search_per_minute: u32,
    /// Allowed calls per client per minute on every other route
    pub default_per_minute: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "0.0.0.0".to_string(),
            limiter: true,
            search_per_minute: 20,
            default_per_minute: 30,
        }
    }
}

/// Chat completion service used to rewrite queries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriterSettings {
    /// Base URL of the OpenAI-compatible service (Open WebUI)
    pub base_url: String,
    /// Bearer token, sent only when non-empty
    pub api_key: String,
    /// Model name
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout: f64,
}

impl Default for RewriterSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: String::new(),
            model: "gemma:2b".to_string(),
            max_tokens: 256,
            temperature: 0.0,
            timeout: 30.0,
        }
    }
}

impl RewriterSettings {
    /// Full chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/api/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Google Places and Maps settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// API key shared by Places search and the Maps embed
    pub api_key: String,
    /// Places Text Search endpoint
    pub places_endpoint: String,
    /// Maps Embed API base for a single place
    pub embed_base_url: String,
    /// Maps URL used for shareable search links
    pub search_base_url: String,
    /// Places request timeout in seconds
    pub search_timeout: f64,
    /// Default embed frame width
    pub embed_width: u32,
    /// Default embed frame height
    pub embed_height: u32,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            places_endpoint: "https://maps.googleapis.com/maps/api/place/textsearch/json"
                .to_string(),
            embed_base_url: "https://www.google.com/maps/embed/v1/place".to_string(),
            search_base_url: "https://www.google.com/maps/search/".to_string(),
            search_timeout: 10.0,
            embed_width: 600,
            embed_height: 450,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}
