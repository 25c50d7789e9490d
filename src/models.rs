// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Data models for research tasks and quick search results
//!
//! Everything here is a plain value record. Nothing is persisted locally;
//! the remote service owns all state beyond the interaction ID string.

use serde::{Deserialize, Serialize};

/// Status of a remote research task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchStatus {
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl ResearchStatus {
    /// Map the remote status vocabulary onto the four canonical statuses.
    ///
    /// Unrecognized values deliberately map to `InProgress` so that a new
    /// remote state never surfaces as a hard failure mid-poll.
    pub fn from_remote(value: &str) -> Self {
        match value {
            "in_progress" => ResearchStatus::InProgress,
            "completed" => ResearchStatus::Completed,
            "failed" => ResearchStatus::Failed,
            "cancelled" => ResearchStatus::Cancelled,
            _ => ResearchStatus::InProgress,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResearchStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchStatus::InProgress => "in_progress",
            ResearchStatus::Completed => "completed",
            ResearchStatus::Failed => "failed",
            ResearchStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ResearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point-in-time status report for a research task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    /// Interaction ID of the task
    pub interaction_id: String,
    /// Current status
    pub status: ResearchStatus,
    /// Error message if the task failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a research task
///
/// `content` and `citations` are populated only when `status` is
/// `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResult {
    /// Interaction ID of the task
    pub interaction_id: String,
    /// Final (or current) status
    pub status: ResearchStatus,
    /// Research report content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Citation URLs extracted from grounding metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<String>>,
    /// Error message if failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Type of a streaming research event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchEventType {
    Start,
    Thought,
    TextDelta,
    Complete,
    Error,
}

/// One incremental update from a live research stream
///
/// A single stream yields at most one `Start`, any interleaving of
/// `Thought` and `TextDelta`, and terminates after exactly one `Complete`
/// or `Error`. Consumers must not expect further events after a terminal
/// one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchEvent {
    /// Type of the event
    pub event_type: ResearchEventType,
    /// Interaction ID (known once the start event arrives)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_id: Option<String>,
    /// Event payload (delta text, thought summary, final content, or error)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Provider event ID, usable for reconnection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

/// Citation from grounding metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Source URL
    pub url: String,
    /// Source title, when the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Grounding support linking a response text segment to citations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSupport {
    /// Text segment that is grounded
    pub text: String,
    /// Start index in the response
    pub start_index: usize,
    /// End index in the response
    pub end_index: usize,
    /// Indices into the citations list
    #[serde(default)]
    pub citation_indices: Vec<usize>,
}

/// Result of a quick search with web grounding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickSearchResult {
    /// Original search query
    pub query: String,
    /// Generated response content
    pub content: String,
    /// Citations in grounding-chunk order, duplicates preserved
    #[serde(default)]
    pub citations: Vec<Citation>,
    /// Grounding supports linking text to citations
    #[serde(default)]
    pub grounding_supports: Vec<GroundingSupport>,
    /// Search queries the model actually issued
    #[serde(default)]
    pub search_queries: Vec<String>,
    /// Model used for generation
    pub model: String,
    /// Error message if failed (content and citations are empty then)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuickSearchResult {
    /// Empty result carrying only the error message.
    pub fn failed(query: &str, model: &str, error: impl Into<String>) -> Self {
        Self {
            query: query.to_string(),
            content: String::new(),
            citations: Vec::new(),
            grounding_supports: Vec::new(),
            search_queries: Vec::new(),
            model: model.to_string(),
            error: Some(error.into()),
        }
    }
}

/// Retrieval metadata for one analyzed URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMetadata {
    /// Retrieved URL
    pub url: String,
    /// Retrieval status reported by the provider
    pub status: String,
    /// Page title; the provider does not supply it in URL-context mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Result of analyzing specific URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlAnalysisResult {
    /// URLs that were analyzed
    pub urls: Vec<String>,
    /// Analysis query or instruction
    pub query: String,
    /// Generated analysis content
    pub content: String,
    /// Per-URL retrieval metadata
    #[serde(default)]
    pub url_metadata: Vec<UrlMetadata>,
    /// Model used for generation
    pub model: String,
    /// Error message if failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UrlAnalysisResult {
    /// Empty result carrying only the error message.
    pub fn failed(urls: &[String], query: &str, model: &str, error: impl Into<String>) -> Self {
        Self {
            urls: urls.to_vec(),
            query: query.to_string(),
            content: String::new(),
            url_metadata: Vec::new(),
            model: model.to_string(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_remote() {
        assert_eq!(
            ResearchStatus::from_remote("in_progress"),
            ResearchStatus::InProgress
        );
        assert_eq!(
            ResearchStatus::from_remote("completed"),
            ResearchStatus::Completed
        );
        assert_eq!(ResearchStatus::from_remote("failed"), ResearchStatus::Failed);
        assert_eq!(
            ResearchStatus::from_remote("cancelled"),
            ResearchStatus::Cancelled
        );
    }

    #[test]
    fn test_unknown_status_defaults_to_in_progress() {
        assert_eq!(
            ResearchStatus::from_remote("queued"),
            ResearchStatus::InProgress
        );
        assert_eq!(ResearchStatus::from_remote(""), ResearchStatus::InProgress);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!ResearchStatus::InProgress.is_terminal());
        assert!(ResearchStatus::Completed.is_terminal());
        assert!(ResearchStatus::Failed.is_terminal());
        assert!(ResearchStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_citation_value_equality() {
        let a = Citation {
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
        };
        let b = Citation {
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&ResearchStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let back: ResearchStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, ResearchStatus::Cancelled);
    }
}
