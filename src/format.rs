// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Human-readable rendering of result values
//!
//! Pure functions from result records to formatted text. The plugin
//! tools and the MCP server pair every structured payload with one of
//! these renderings; keeping them here means the text half is written
//! once and tested once instead of per tool.

use crate::models::{
    QuickSearchResult, ResearchResult, ResearchStatus, StatusReport, UrlAnalysisResult,
};

/// Provider status string for a successfully retrieved URL
pub const URL_RETRIEVAL_SUCCESS: &str = "URL_RETRIEVAL_STATUS_SUCCESS";

pub fn render_status(report: &StatusReport) -> String {
    let mut out = format!(
        "Interaction ID: {}\nStatus: {}",
        report.interaction_id, report.status
    );
    if let Some(error) = &report.error {
        out.push_str(&format!("\nError: {}", error));
    }
    out
}

pub fn render_research_result(result: &ResearchResult) -> String {
    match result.status {
        ResearchStatus::Completed => {
            let mut out = result.content.clone().unwrap_or_default();
            if let Some(citations) = &result.citations {
                if !citations.is_empty() {
                    out.push_str("\n\nCitations:\n");
                    for (i, url) in citations.iter().enumerate() {
                        out.push_str(&format!("  {}. {}\n", i + 1, url));
                    }
                }
            }
            out
        }
        ResearchStatus::InProgress => format!(
            "Research is still in progress. Interaction ID: {}",
            result.interaction_id
        ),
        ResearchStatus::Failed | ResearchStatus::Cancelled => format!(
            "Research {}: {}",
            result.status,
            result.error.as_deref().unwrap_or("no error message")
        ),
    }
}

pub fn render_quick_search(result: &QuickSearchResult) -> String {
    if let Some(error) = &result.error {
        return format!("Error: {}", error);
    }

    let mut out = result.content.clone();

    if !result.citations.is_empty() {
        out.push_str("\n\nCitations:\n");
        for (i, citation) in result.citations.iter().enumerate() {
            let title = citation.title.as_deref().unwrap_or(&citation.url);
            out.push_str(&format!("  {}. {} - {}\n", i + 1, title, citation.url));
        }
    }

    if !result.search_queries.is_empty() {
        out.push_str("\nSearch queries used:\n");
        for query in &result.search_queries {
            out.push_str(&format!("  - {}\n", query));
        }
    }

    out
}

pub fn render_url_analysis(result: &UrlAnalysisResult) -> String {
    if let Some(error) = &result.error {
        return format!("Error: {}", error);
    }

    let mut out = result.content.clone();

    if !result.url_metadata.is_empty() {
        out.push_str("\n\nURL retrieval status:\n");
        for meta in &result.url_metadata {
            let mark = if meta.status == URL_RETRIEVAL_SUCCESS {
                "[ok]"
            } else {
                "[failed]"
            };
            out.push_str(&format!("  {} {}\n", mark, meta.url));
        }
    }

    out
}

pub fn render_followup(question: &str, answer: &str) -> String {
    format!("Question: {}\n\nAnswer:\n{}", question, answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Citation;

    #[test]
    fn test_render_status_with_error() {
        let text = render_status(&StatusReport {
            interaction_id: "interactions/abc".to_string(),
            status: ResearchStatus::Failed,
            error: Some("boom".to_string()),
        });
        assert!(text.contains("interactions/abc"));
        assert!(text.contains("failed"));
        assert!(text.contains("boom"));
    }

    #[test]
    fn test_render_completed_result_lists_citations() {
        let text = render_research_result(&ResearchResult {
            interaction_id: "interactions/abc".to_string(),
            status: ResearchStatus::Completed,
            content: Some("# Report".to_string()),
            citations: Some(vec!["https://a.example".to_string()]),
            error: None,
        });
        assert!(text.starts_with("# Report"));
        assert!(text.contains("1. https://a.example"));
    }

    #[test]
    fn test_render_in_progress_result() {
        let text = render_research_result(&ResearchResult {
            interaction_id: "interactions/abc".to_string(),
            status: ResearchStatus::InProgress,
            content: None,
            citations: None,
            error: None,
        });
        assert!(text.contains("still in progress"));
    }

    #[test]
    fn test_render_quick_search_error_short_circuits() {
        let result = QuickSearchResult::failed("q", "gemini-3-flash-preview", "no network");
        assert_eq!(render_quick_search(&result), "Error: no network");
    }

    #[test]
    fn test_render_quick_search_uses_title_over_url() {
        let result = QuickSearchResult {
            query: "q".to_string(),
            content: "answer".to_string(),
            citations: vec![Citation {
                url: "https://a.example".to_string(),
                title: Some("Example A".to_string()),
            }],
            grounding_supports: Vec::new(),
            search_queries: vec!["a query".to_string()],
            model: "gemini-3-flash-preview".to_string(),
            error: None,
        };
        let text = render_quick_search(&result);
        assert!(text.contains("Example A - https://a.example"));
        assert!(text.contains("- a query"));
    }

    #[test]
    fn test_render_url_analysis_marks_failures() {
        use crate::models::UrlMetadata;
        let result = UrlAnalysisResult {
            urls: vec!["https://a.example".to_string()],
            query: "q".to_string(),
            content: "analysis".to_string(),
            url_metadata: vec![
                UrlMetadata {
                    url: "https://a.example".to_string(),
                    status: URL_RETRIEVAL_SUCCESS.to_string(),
                    title: None,
                },
                UrlMetadata {
                    url: "https://b.example".to_string(),
                    status: "URL_RETRIEVAL_STATUS_ERROR".to_string(),
                    title: None,
                },
            ],
            model: "gemini-3-flash-preview".to_string(),
            error: None,
        };
        let text = render_url_analysis(&result);
        assert!(text.contains("[ok] https://a.example"));
        assert!(text.contains("[failed] https://b.example"));
    }
}
