// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Quick search client
//!
//! Single-round-trip answer generation grounded in live web search
//! and/or explicit URL content. Unlike the research client, nothing
//! here raises: every failure - including validation - comes back as a
//! result with `error` set and empty content. Front-ends branch on the
//! error field, not on exceptions.

use std::sync::Arc;

use super::resolve_api_key;
use crate::error::Result;
use crate::gemini::{GeminiTransport, HttpClientConfig, HttpTransport, ToolConfig};
use crate::models::{
    Citation, GroundingSupport, QuickSearchResult, UrlAnalysisResult, UrlMetadata,
};

/// Maximum URLs the provider accepts per URL-context request
const MAX_URLS: usize = 20;

/// Client for grounded quick search and URL analysis
pub struct QuickSearchClient {
    transport: Arc<dyn GeminiTransport>,
}

impl QuickSearchClient {
    pub const DEFAULT_MODEL: &'static str = "gemini-3-flash-preview";
    pub const SUPPORTED_MODELS: [&'static str; 2] =
        ["gemini-3-pro-preview", "gemini-3-flash-preview"];

    // 日本語回答を指示するシステムプロンプト
    const SYSTEM_PROMPT_JA: &'static str = "必ず日本語で回答してください。";

    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = resolve_api_key(api_key)?;
        let transport = HttpTransport::new(api_key, &HttpClientConfig::default())?;
        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(None)
    }

    /// Build a client over a custom transport (tests, proxies).
    pub fn with_transport(transport: Arc<dyn GeminiTransport>) -> Self {
        Self { transport }
    }

    fn build_prompt(query: &str, language: &str) -> String {
        if language == "ja" {
            format!("{}\n\n{}", Self::SYSTEM_PROMPT_JA, query)
        } else {
            query.to_string()
        }
    }

    /// Quick web search with Google Search grounding.
    pub async fn quick_search(
        &self,
        query: &str,
        model: &str,
        language: &str,
    ) -> QuickSearchResult {
        let prompt = Self::build_prompt(query, language);
        self.grounded_generate(query, &prompt, &[ToolConfig::GoogleSearch], model)
            .await
    }

    /// Analyze content from specific URLs (max 20 per request).
    pub async fn analyze_urls(
        &self,
        urls: &[String],
        query: &str,
        model: &str,
        language: &str,
    ) -> UrlAnalysisResult {
        if urls.len() > MAX_URLS {
            // Validated locally, before any network call
            return UrlAnalysisResult::failed(
                urls,
                query,
                model,
                "Maximum 20 URLs allowed per request",
            );
        }

        let url_list = urls.join("\n");
        let prompt = Self::build_prompt(&format!("{}\n\nURLs:\n{}", query, url_list), language);

        let response = match self
            .transport
            .generate_content(model, &prompt, &[ToolConfig::UrlContext])
            .await
        {
            Ok(response) => response,
            Err(e) => return UrlAnalysisResult::failed(urls, query, model, e.to_string()),
        };

        let url_metadata = response
            .url_context_metadata()
            .map(|metadata| {
                metadata
                    .url_metadata
                    .iter()
                    .map(|meta| UrlMetadata {
                        url: meta.retrieved_url.clone(),
                        status: meta.url_retrieval_status.clone(),
                        // Title is not provided in URL-context metadata
                        title: None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        UrlAnalysisResult {
            urls: urls.to_vec(),
            query: query.to_string(),
            content: response.text(),
            url_metadata,
            model: model.to_string(),
            error: None,
        }
    }

    /// Search with optional URL context for deeper analysis.
    pub async fn search_and_analyze(
        &self,
        query: &str,
        urls: &[String],
        model: &str,
        language: &str,
    ) -> QuickSearchResult {
        let mut prompt = Self::build_prompt(query, language);
        if !urls.is_empty() {
            prompt = format!("{}\n\n参考URL:\n{}", prompt, urls.join("\n"));
        }
        self.grounded_generate(
            query,
            &prompt,
            &[ToolConfig::GoogleSearch, ToolConfig::UrlContext],
            model,
        )
        .await
    }

    async fn grounded_generate(
        &self,
        query: &str,
        prompt: &str,
        tools: &[ToolConfig],
        model: &str,
    ) -> QuickSearchResult {
        let response = match self.transport.generate_content(model, prompt, tools).await {
            Ok(response) => response,
            Err(e) => return QuickSearchResult::failed(query, model, e.to_string()),
        };

        let mut citations = Vec::new();
        let mut grounding_supports = Vec::new();
        let mut search_queries = Vec::new();

        if let Some(metadata) = response.grounding_metadata() {
            search_queries = metadata.web_search_queries.clone();

            // Citation order equals grounding-chunk order; nothing is
            // de-duplicated or re-ranked locally.
            for chunk in &metadata.grounding_chunks {
                if let Some(web) = &chunk.web {
                    citations.push(Citation {
                        url: web.uri.clone(),
                        title: web.title.clone(),
                    });
                }
            }

            for support in &metadata.grounding_supports {
                if let Some(segment) = &support.segment {
                    grounding_supports.push(GroundingSupport {
                        text: segment.text.clone(),
                        start_index: segment.start_index,
                        end_index: segment.end_index,
                        citation_indices: support.grounding_chunk_indices.clone(),
                    });
                }
            }
        }

        QuickSearchResult {
            query: query.to_string(),
            content: response.text(),
            citations,
            grounding_supports,
            search_queries,
            model: model.to_string(),
            error: None,
        }
    }
}
