//! HTTP client for making requests to the rewrite and places services

use super::request::{HttpMethod, HttpRequest, HttpResponse};
use crate::config::OutgoingSettings;
use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tokio::time::timeout;

/// HTTP client wrapper with relay-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: format!("places-relay/{}", crate::VERSION),
        })
    }

    /// Execute a request, failing once `limit` elapses
    pub async fn execute(&self, request: HttpRequest, limit: Duration) -> Result<HttpResponse> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = req_builder
            .timeout(limit)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(ref body) = request.json {
            req_builder = req_builder.json(body);
        }

        // The reqwest timeout covers the send; this one also bounds reading the body
        let exchange = async {
            let response = req_builder.send().await?;
            Self::parse_response(response).await
        };

        match timeout(limit, exchange).await {
            Ok(result) => result,
            Err(_) => Err(anyhow!("request to {} timed out after {:?}", request.url, limit)),
        }
    }

    /// Parse response into HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(HttpResponse { status, text })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
