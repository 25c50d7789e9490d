// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Synchronous tool bindings for agent frameworks
//!
//! Agent frameworks call tools as plain blocking functions that return
//! JSON-shaped maps. [`AgentToolkit`] owns a tokio runtime and wraps
//! both clients behind that calling convention: every method blocks,
//! returns a `serde_json::Value` object with a fixed key set, and
//! reports failure through the `error` key instead of panicking.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::runtime::Runtime;

use crate::client::{DeepResearchClient, QuickSearchClient};
use crate::error::Result;

/// Blocking tool surface over both clients
pub struct AgentToolkit {
    runtime: Runtime,
    research: DeepResearchClient,
    quick: QuickSearchClient,
}

impl AgentToolkit {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            runtime,
            research: DeepResearchClient::new(api_key.clone())?,
            quick: QuickSearchClient::new(api_key)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(None)
    }

    /// Build a toolkit from pre-built clients (tests inject fake
    /// transports this way).
    pub fn with_clients(research: DeepResearchClient, quick: QuickSearchClient) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            runtime,
            research,
            quick,
        })
    }

    /// Run a research task to completion and return the full result.
    ///
    /// Blocks for minutes. Keys: `interaction_id`, `status`, `content`,
    /// `citations`, `error`.
    pub fn deep_research(
        &self,
        query: &str,
        format_instructions: Option<&str>,
        timeout_secs: u64,
    ) -> Value {
        let outcome = self.runtime.block_on(self.research.research(
            query,
            format_instructions,
            DeepResearchClient::DEFAULT_POLL_INTERVAL,
            Duration::from_secs(timeout_secs),
        ));
        match outcome {
            Ok(result) => json!({
                "interaction_id": result.interaction_id,
                "status": result.status.as_str(),
                "content": result.content,
                "citations": result.citations,
                "error": result.error,
            }),
            Err(e) => json!({
                "interaction_id": Value::Null,
                "status": "failed",
                "content": Value::Null,
                "citations": Value::Null,
                "error": format!("Research failed: {}", e),
            }),
        }
    }

    /// Fire-and-forget start. Keys: `interaction_id`, `status`, and
    /// `message` on success / `error` on failure.
    pub fn start_deep_research(&self, query: &str, format_instructions: Option<&str>) -> Value {
        match self
            .runtime
            .block_on(self.research.start_research(query, format_instructions))
        {
            Ok(interaction_id) => json!({
                "interaction_id": interaction_id,
                "status": "in_progress",
                "message": "Research started. Use get_research_status to check progress.",
            }),
            Err(e) => json!({
                "interaction_id": Value::Null,
                "status": "failed",
                "error": format!("Failed to start research: {}", e),
            }),
        }
    }

    /// Keys: `interaction_id`, `status`, `error`.
    pub fn get_research_status(&self, interaction_id: &str) -> Value {
        match self.runtime.block_on(self.research.get_status(interaction_id)) {
            Ok(status) => json!({
                "interaction_id": status.interaction_id,
                "status": status.status.as_str(),
                "error": status.error,
            }),
            Err(e) => json!({
                "interaction_id": interaction_id,
                "status": "failed",
                "error": format!("Failed to get status: {}", e),
            }),
        }
    }

    /// Keys: `interaction_id`, `status`, `content`, `citations`, `error`.
    pub fn get_research_result(&self, interaction_id: &str) -> Value {
        match self.runtime.block_on(self.research.get_result(interaction_id)) {
            Ok(result) => json!({
                "interaction_id": result.interaction_id,
                "status": result.status.as_str(),
                "content": result.content,
                "citations": result.citations,
                "error": result.error,
            }),
            Err(e) => json!({
                "interaction_id": interaction_id,
                "status": "failed",
                "content": Value::Null,
                "citations": Value::Null,
                "error": format!("Failed to get result: {}", e),
            }),
        }
    }

    /// Keys: `previous_interaction_id`, `question`, `answer`, `error`.
    pub fn ask_followup_question(&self, previous_interaction_id: &str, question: &str) -> Value {
        match self
            .runtime
            .block_on(self.research.ask_followup(previous_interaction_id, question))
        {
            Ok(answer) => json!({
                "previous_interaction_id": previous_interaction_id,
                "question": question,
                "answer": answer,
                "error": Value::Null,
            }),
            Err(e) => json!({
                "previous_interaction_id": previous_interaction_id,
                "question": question,
                "answer": Value::Null,
                "error": format!("Failed to get follow-up answer: {}", e),
            }),
        }
    }

    /// Keys: `query`, `content`, `citations`, `search_queries`, `model`,
    /// `error`.
    pub fn quick_search(&self, query: &str, model: &str, language: &str) -> Value {
        let result = self
            .runtime
            .block_on(self.quick.quick_search(query, model, language));
        json!({
            "query": result.query,
            "content": result.content,
            "citations": result.citations,
            "search_queries": result.search_queries,
            "model": result.model,
            "error": result.error,
        })
    }

    /// Keys: `urls`, `query`, `content`, `url_metadata`, `model`, `error`.
    pub fn analyze_urls(&self, urls: &[String], query: &str, model: &str, language: &str) -> Value {
        let result = self
            .runtime
            .block_on(self.quick.analyze_urls(urls, query, model, language));
        json!({
            "urls": result.urls,
            "query": result.query,
            "content": result.content,
            "url_metadata": result.url_metadata,
            "model": result.model,
            "error": result.error,
        })
    }

    /// Keys: `query`, `content`, `citations`, `search_queries`, `model`,
    /// `error`.
    pub fn search_and_analyze(
        &self,
        query: &str,
        urls: &[String],
        model: &str,
        language: &str,
    ) -> Value {
        let result = self
            .runtime
            .block_on(self.quick.search_and_analyze(query, urls, model, language));
        json!({
            "query": result.query,
            "content": result.content,
            "citations": result.citations,
            "search_queries": result.search_queries,
            "model": result.model,
            "error": result.error,
        })
    }
}
