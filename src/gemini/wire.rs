// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Wire format of the Gemini API
//!
//! Request and response shapes for the Interactions API and
//! `generateContent`. Only the fields this crate reads are modeled; the
//! vendor is free to add more.

use serde::{Deserialize, Serialize};

/// Request body for creating an interaction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRequest {
    /// Prompt text
    pub input: String,
    /// Agent identifier (e.g. the deep research agent)
    pub agent: String,
    /// Run in background mode and return immediately
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub background: bool,
    /// Deliver results over a streaming connection
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
    /// Agent configuration (thinking summaries etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_config: Option<AgentConfig>,
    /// Link this turn to a prior interaction (follow-up questions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_interaction_id: Option<String>,
}

impl InteractionRequest {
    pub fn background(input: String, agent: &str) -> Self {
        Self {
            input,
            agent: agent.to_string(),
            background: true,
            stream: false,
            agent_config: None,
            previous_interaction_id: None,
        }
    }

    pub fn followup(input: String, agent: &str, previous_interaction_id: &str) -> Self {
        Self {
            input,
            agent: agent.to_string(),
            background: false,
            stream: false,
            agent_config: None,
            previous_interaction_id: Some(previous_interaction_id.to_string()),
        }
    }
}

/// Agent configuration for streaming deep research
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    #[serde(rename = "type")]
    pub agent_type: String,
    pub thinking_summaries: String,
}

impl AgentConfig {
    pub fn deep_research() -> Self {
        Self {
            agent_type: "deep-research".to_string(),
            thinking_summaries: "auto".to_string(),
        }
    }
}

/// A remote interaction (long-running task)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: String,
    /// Remote status vocabulary; mapped via `ResearchStatus::from_remote`
    #[serde(default)]
    pub status: String,
    /// Ordered outputs, oldest first
    #[serde(default)]
    pub outputs: Vec<InteractionOutput>,
    #[serde(default)]
    pub error: Option<RemoteError>,
}

impl Interaction {
    /// Last non-empty textual output, scanning newest-first.
    pub fn last_text(&self) -> Option<String> {
        self.outputs
            .iter()
            .rev()
            .find_map(|output| match &output.text {
                Some(text) if !text.is_empty() => Some(text.clone()),
                _ => None,
            })
    }

    /// Citation URLs from grounding metadata across all outputs, in
    /// output iteration order. Duplicates are not removed.
    pub fn citation_urls(&self) -> Vec<String> {
        let mut citations = Vec::new();
        for output in &self.outputs {
            if let Some(metadata) = &output.grounding_metadata {
                for chunk in &metadata.grounding_chunks {
                    if let Some(web) = &chunk.web {
                        citations.push(web.uri.clone());
                    }
                }
            }
        }
        citations
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.message.clone())
    }
}

/// One output of an interaction
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionOutput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// Error payload attached to an interaction or stream chunk
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub message: String,
}

/// One chunk of a streaming interaction connection
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamChunk {
    /// "interaction.start", "content.delta", "interaction.complete", "error"
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub interaction: Option<Interaction>,
    #[serde(default)]
    pub delta: Option<ContentDelta>,
    #[serde(default)]
    pub error: Option<RemoteError>,
}

/// Content delta carried by a "content.delta" chunk
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDelta {
    /// "text" or "thought_summary"
    #[serde(rename = "type", default)]
    pub delta_type: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub content: Option<DeltaContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeltaContent {
    #[serde(default)]
    pub text: Option<String>,
}

impl ContentDelta {
    /// Thought summaries arrive nested under `content`; fall back to the
    /// flat `text` field when the provider sends it there.
    pub fn thought_text(&self) -> Option<String> {
        self.content
            .as_ref()
            .and_then(|c| c.text.clone())
            .or_else(|| self.text.clone())
    }
}

/// Per-request tool enablement for `generateContent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolConfig {
    GoogleSearch,
    UrlContext,
}

impl Serialize for ToolConfig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            ToolConfig::GoogleSearch => {
                map.serialize_entry("googleSearch", &serde_json::json!({}))?
            }
            ToolConfig::UrlContext => map.serialize_entry("urlContext", &serde_json::json!({}))?,
        }
        map.end()
    }
}

/// Request body for `generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolConfig>,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str, tools: &[ToolConfig]) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            tools: tools.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response body of `generateContent`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    pub fn grounding_metadata(&self) -> Option<&GroundingMetadata> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
    }

    pub fn url_context_metadata(&self) -> Option<&UrlContextMetadata> {
        self.candidates
            .first()
            .and_then(|c| c.url_context_metadata.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default = "empty_content")]
    pub content: Content,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
    #[serde(default)]
    pub url_context_metadata: Option<UrlContextMetadata>,
}

fn empty_content() -> Content {
    Content { parts: Vec::new() }
}

/// Grounding metadata attached to a candidate or interaction output
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub web_search_queries: Vec<String>,
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
    #[serde(default)]
    pub grounding_supports: Vec<WireGroundingSupport>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGroundingSupport {
    #[serde(default)]
    pub segment: Option<Segment>,
    #[serde(default)]
    pub grounding_chunk_indices: Vec<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub start_index: usize,
    #[serde(default)]
    pub end_index: usize,
}

/// URL-context metadata attached to a candidate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlContextMetadata {
    #[serde(default)]
    pub url_metadata: Vec<WireUrlMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUrlMetadata {
    #[serde(default)]
    pub retrieved_url: String,
    #[serde(default = "unknown_status")]
    pub url_retrieval_status: String,
}

fn unknown_status() -> String {
    "unknown".to_string()
}
