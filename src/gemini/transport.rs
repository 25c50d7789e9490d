// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! HTTP transport to the Gemini API
//!
//! `GeminiTransport` is the seam between the clients and the network;
//! the HTTP implementation lives here, tests substitute their own.
//!
//! ## Authentication
//!
//! The API key is sent as a `key` query parameter, which is how Google's
//! endpoints authenticate.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};

use super::wire::{
    GenerateContentRequest, GenerateContentResponse, Interaction, InteractionRequest, StreamChunk,
    ToolConfig,
};
use crate::error::{GrtError, Result};

const GEMINI_API: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Boxed stream of raw chunks from a streaming interaction
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk>> + Send>>;

/// Transport seam over the Gemini API
#[async_trait]
pub trait GeminiTransport: Send + Sync {
    /// Create an interaction (background or follow-up turn).
    async fn create_interaction(&self, request: InteractionRequest) -> Result<Interaction>;

    /// Fetch the current state of an interaction.
    async fn get_interaction(&self, interaction_id: &str) -> Result<Interaction>;

    /// Open a streaming interaction and return its chunk stream.
    async fn stream_interaction(&self, request: InteractionRequest) -> Result<ChunkStream>;

    /// Single-round-trip generation with tool enablement.
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        tools: &[ToolConfig],
    ) -> Result<GenerateContentResponse>;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            // The Gemini API requires a minimum 10 second deadline
            timeout_secs: 300,
            user_agent: format!("grt-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Deep research calls can run for up to an hour.
    pub fn deep_research() -> Self {
        Self {
            timeout_secs: 3600,
            ..Default::default()
        }
    }
}

fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(&config.user_agent)
        .build()?;
    Ok(client)
}

/// Transport over the live Gemini API
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl HttpTransport {
    pub fn new(api_key: String, config: &HttpClientConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            api_key,
            base_url: GEMINI_API.to_string(),
        })
    }

    /// Point the transport at a different endpoint (local proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}?key={}", self.base_url, path, self.api_key)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(GrtError::Remote(format!("{}: {}", status, body)))
    }
}

#[async_trait]
impl GeminiTransport for HttpTransport {
    async fn create_interaction(&self, request: InteractionRequest) -> Result<Interaction> {
        log::debug!("create_interaction agent={}", request.agent);
        let response = self
            .client
            .post(self.url("interactions"))
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn get_interaction(&self, interaction_id: &str) -> Result<Interaction> {
        log::debug!("get_interaction id={}", interaction_id);
        // Interaction IDs come back as "interactions/<id>" resource names
        let path = if interaction_id.starts_with("interactions/") {
            interaction_id.to_string()
        } else {
            format!("interactions/{}", interaction_id)
        };
        let response = self.client.get(self.url(&path)).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn stream_interaction(&self, request: InteractionRequest) -> Result<ChunkStream> {
        log::debug!("stream_interaction agent={}", request.agent);
        let response = self
            .client
            .post(self.url("interactions"))
            .header("Accept", "text/event-stream")
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let stream = async_stream::try_stream! {
            let mut bytes = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = chunk.map_err(GrtError::Http)?;
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // SSE frames are newline-delimited; a partial trailing
                // line stays in the buffer until the next read.
                while let Some(pos) = buffer.find('\n') {
                    let line = buffer[..pos].trim_end_matches('\r').to_string();
                    buffer.drain(..=pos);

                    let Some(data) = line.strip_prefix("data:") else {
                        continue;
                    };
                    let data = data.trim();
                    if data.is_empty() || data == "[DONE]" {
                        continue;
                    }
                    let parsed: StreamChunk =
                        serde_json::from_str(data).map_err(GrtError::Json)?;
                    yield parsed;
                }
            }
        };

        Ok(Box::pin(stream))
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        tools: &[ToolConfig],
    ) -> Result<GenerateContentResponse> {
        log::debug!("generate_content model={} tools={}", model, tools.len());
        let request = GenerateContentRequest::new(prompt, tools);
        let response = self
            .client
            .post(self.url(&format!("models/{}:generateContent", model)))
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}
