// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Plugin tool implementations
//!
//! Each tool validates its parameters, makes one client call, and emits
//! the JSON + text message pair. The text half always comes from
//! [`crate::format`] so the rendering is written once, not per tool.

use std::time::Duration;

use serde_json::{json, Value};

use super::ToolMessage;
use crate::client::{DeepResearchClient, QuickSearchClient};
use crate::format;
use crate::models::{ResearchStatus, StatusReport};

/// The plugin tool set over dependency-injected clients
pub struct PluginTools {
    research: DeepResearchClient,
    quick: QuickSearchClient,
}

fn error_pair(message: &str) -> Vec<ToolMessage> {
    vec![
        ToolMessage::Json(json!({ "error": message })),
        ToolMessage::Text(format!("Error: {}", message)),
    ]
}

fn required_str<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn str_or<'a>(params: &'a Value, key: &str, default: &'a str) -> &'a str {
    params.get(key).and_then(Value::as_str).unwrap_or(default)
}

fn url_list(params: &Value, key: &str) -> Vec<String> {
    params
        .get(key)
        .and_then(Value::as_array)
        .map(|urls| {
            urls.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl PluginTools {
    pub fn new(research: DeepResearchClient, quick: QuickSearchClient) -> Self {
        Self { research, quick }
    }

    /// Run deep research. With `wait_for_completion: false` (the
    /// default) the tool returns right after submission; otherwise it
    /// polls up to `timeout` seconds.
    pub async fn deep_research(&self, params: &Value) -> Vec<ToolMessage> {
        let Some(query) = required_str(params, "query") else {
            return error_pair("query is required");
        };
        let format_instructions = required_str(params, "format_instructions");
        let wait_for_completion = params
            .get("wait_for_completion")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let timeout_secs = params
            .get("timeout")
            .and_then(Value::as_u64)
            .unwrap_or(DeepResearchClient::DEFAULT_TIMEOUT.as_secs());

        let interaction_id = match self.research.start_research(query, format_instructions).await
        {
            Ok(id) => id,
            Err(e) => return error_pair(&format!("Failed to start research: {}", e)),
        };

        if !wait_for_completion {
            let payload = json!({
                "interaction_id": interaction_id,
                "status": "in_progress",
                "message": "Research started. Use get_research_status to check progress.",
            });
            let text = format::render_status(&StatusReport {
                interaction_id,
                status: ResearchStatus::InProgress,
                error: None,
            });
            return vec![ToolMessage::Json(payload), ToolMessage::Text(text)];
        }

        match self
            .research
            .poll_until_complete(
                &interaction_id,
                DeepResearchClient::DEFAULT_POLL_INTERVAL,
                Duration::from_secs(timeout_secs),
            )
            .await
        {
            Ok(result) => {
                let payload = json!({
                    "interaction_id": result.interaction_id,
                    "status": result.status.as_str(),
                    "content": result.content,
                    "citations": result.citations,
                    "error": result.error,
                });
                let text = format::render_research_result(&result);
                vec![ToolMessage::Json(payload), ToolMessage::Text(text)]
            }
            Err(e) => error_pair(&e.to_string()),
        }
    }

    pub async fn get_research_status(&self, params: &Value) -> Vec<ToolMessage> {
        let Some(interaction_id) = required_str(params, "interaction_id") else {
            return error_pair("interaction_id is required");
        };
        match self.research.get_status(interaction_id).await {
            Ok(status) => {
                let payload = json!({
                    "interaction_id": status.interaction_id,
                    "status": status.status.as_str(),
                    "error": status.error,
                });
                let text = format::render_status(&status);
                vec![ToolMessage::Json(payload), ToolMessage::Text(text)]
            }
            Err(e) => error_pair(&format!("Failed to get status: {}", e)),
        }
    }

    pub async fn get_research_result(&self, params: &Value) -> Vec<ToolMessage> {
        let Some(interaction_id) = required_str(params, "interaction_id") else {
            return error_pair("interaction_id is required");
        };
        match self.research.get_result(interaction_id).await {
            Ok(result) => {
                let payload = json!({
                    "interaction_id": result.interaction_id,
                    "status": result.status.as_str(),
                    "content": result.content,
                    "citations": result.citations,
                    "error": result.error,
                });
                let text = format::render_research_result(&result);
                vec![ToolMessage::Json(payload), ToolMessage::Text(text)]
            }
            Err(e) => error_pair(&format!("Failed to get result: {}", e)),
        }
    }

    pub async fn ask_followup_question(&self, params: &Value) -> Vec<ToolMessage> {
        let Some(previous_interaction_id) = required_str(params, "previous_interaction_id")
        else {
            return error_pair("previous_interaction_id is required");
        };
        let Some(question) = required_str(params, "question") else {
            return error_pair("question is required");
        };
        match self
            .research
            .ask_followup(previous_interaction_id, question)
            .await
        {
            Ok(answer) => {
                let payload = json!({
                    "previous_interaction_id": previous_interaction_id,
                    "question": question,
                    "answer": answer,
                    "error": Value::Null,
                });
                let text = format::render_followup(question, &answer);
                vec![ToolMessage::Json(payload), ToolMessage::Text(text)]
            }
            Err(e) => error_pair(&format!("Failed to get follow-up answer: {}", e)),
        }
    }

    pub async fn quick_search(&self, params: &Value) -> Vec<ToolMessage> {
        let Some(query) = required_str(params, "query") else {
            return error_pair("query is required");
        };
        let model = str_or(params, "model", QuickSearchClient::DEFAULT_MODEL);
        let language = str_or(params, "language", "ja");

        let result = self.quick.quick_search(query, model, language).await;
        let payload = json!({
            "query": result.query,
            "content": result.content,
            "citations": result.citations,
            "search_queries": result.search_queries,
            "model": result.model,
            "error": result.error,
        });
        let text = format::render_quick_search(&result);
        vec![ToolMessage::Json(payload), ToolMessage::Text(text)]
    }

    pub async fn analyze_urls(&self, params: &Value) -> Vec<ToolMessage> {
        let urls = url_list(params, "urls");
        if urls.is_empty() {
            return error_pair("urls is required");
        }
        let Some(query) = required_str(params, "query") else {
            return error_pair("query is required");
        };
        let model = str_or(params, "model", QuickSearchClient::DEFAULT_MODEL);
        let language = str_or(params, "language", "ja");

        let result = self.quick.analyze_urls(&urls, query, model, language).await;
        let payload = json!({
            "urls": result.urls,
            "query": result.query,
            "content": result.content,
            "url_metadata": result.url_metadata,
            "model": result.model,
            "error": result.error,
        });
        let text = format::render_url_analysis(&result);
        vec![ToolMessage::Json(payload), ToolMessage::Text(text)]
    }

    pub async fn search_and_analyze(&self, params: &Value) -> Vec<ToolMessage> {
        let Some(query) = required_str(params, "query") else {
            return error_pair("query is required");
        };
        let urls = url_list(params, "urls");
        let model = str_or(params, "model", QuickSearchClient::DEFAULT_MODEL);
        let language = str_or(params, "language", "ja");

        let result = self
            .quick
            .search_and_analyze(query, &urls, model, language)
            .await;
        let payload = json!({
            "query": result.query,
            "content": result.content,
            "citations": result.citations,
            "search_queries": result.search_queries,
            "model": result.model,
            "error": result.error,
        });
        let text = format::render_quick_search(&result);
        vec![ToolMessage::Json(payload), ToolMessage::Text(text)]
    }
}
