//! Tests for the quick search client
//!
//! Covers the error-in-result contract (nothing raises), citation
//! ordering, local URL-count validation, and tool enablement against a
//! scripted transport.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use serde_json::json;

use common::FakeTransport;
use grt::client::QuickSearchClient;
use grt::gemini::ToolConfig;

fn client(transport: Arc<FakeTransport>) -> QuickSearchClient {
    QuickSearchClient::with_transport(transport)
}

// ============================================================================
// Quick Search Tests
// ============================================================================

mod quick_search_tests {
    use super::*;

    #[tokio::test]
    async fn test_citations_preserve_grounding_chunk_order() {
        let transport = Arc::new(FakeTransport::with_generate(common::generate_response(
            json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "answer" }] },
                    "groundingMetadata": {
                        "webSearchQueries": ["chunk order"],
                        "groundingChunks": [
                            { "web": { "uri": "a", "title": "Source A" } },
                            { "web": { "uri": "b" } }
                        ]
                    }
                }]
            }),
        )));
        let client = client(Arc::clone(&transport));

        let result = client.quick_search("q", "gemini-3-flash-preview", "en").await;

        assert!(result.error.is_none());
        assert_eq!(result.content, "answer");
        let urls: Vec<&str> = result.citations.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b"]);
        assert_eq!(result.citations[0].title.as_deref(), Some("Source A"));
        assert_eq!(result.search_queries, vec!["chunk order"]);

        let call = transport.last_generate.lock().unwrap().clone().unwrap();
        assert_eq!(call.tools, vec![ToolConfig::GoogleSearch]);
        assert_eq!(call.prompt, "q");
    }

    #[tokio::test]
    async fn test_japanese_language_prefixes_the_prompt() {
        let transport = Arc::new(FakeTransport::with_generate(
            common::generate_response(json!({ "candidates": [] })),
        ));
        let client = client(Arc::clone(&transport));

        client.quick_search("q", "gemini-3-flash-preview", "ja").await;

        let call = transport.last_generate.lock().unwrap().clone().unwrap();
        assert!(call.prompt.starts_with("必ず日本語で回答してください。"));
        assert!(call.prompt.ends_with("q"));
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_result() {
        let transport = Arc::new(FakeTransport::with_generate_error("503: overloaded"));
        let client = client(transport);

        let result = client.quick_search("q", "gemini-3-flash-preview", "ja").await;

        assert!(result.error.as_deref().unwrap().contains("overloaded"));
        assert!(result.content.is_empty());
        assert!(result.citations.is_empty());
        assert_eq!(result.query, "q");
        assert_eq!(result.model, "gemini-3-flash-preview");
    }

    #[tokio::test]
    async fn test_grounding_supports_are_extracted() {
        let transport = Arc::new(FakeTransport::with_generate(common::generate_response(
            json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "grounded answer" }] },
                    "groundingMetadata": {
                        "groundingChunks": [{ "web": { "uri": "a" } }],
                        "groundingSupports": [{
                            "segment": { "text": "grounded", "startIndex": 0, "endIndex": 8 },
                            "groundingChunkIndices": [0]
                        }]
                    }
                }]
            }),
        )));
        let client = client(transport);

        let result = client.quick_search("q", "gemini-3-flash-preview", "en").await;

        assert_eq!(result.grounding_supports.len(), 1);
        let support = &result.grounding_supports[0];
        assert_eq!(support.text, "grounded");
        assert_eq!(support.end_index, 8);
        assert_eq!(support.citation_indices, vec![0]);
    }
}

// ============================================================================
// URL Analysis Tests
// ============================================================================

mod url_analysis_tests {
    use super::*;

    #[tokio::test]
    async fn test_more_than_twenty_urls_fails_before_any_network_call() {
        let transport = Arc::new(FakeTransport::default());
        let client = client(Arc::clone(&transport));

        let urls: Vec<String> = (0..21).map(|i| format!("https://example.com/{i}")).collect();
        let result = client
            .analyze_urls(&urls, "compare", "gemini-3-flash-preview", "ja")
            .await;

        assert_eq!(
            result.error.as_deref(),
            Some("Maximum 20 URLs allowed per request")
        );
        assert!(result.content.is_empty());
        assert_eq!(result.urls.len(), 21);
        assert_eq!(transport.generate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exactly_twenty_urls_is_allowed() {
        let transport = Arc::new(FakeTransport::with_generate(
            common::generate_response(json!({ "candidates": [] })),
        ));
        let client = client(Arc::clone(&transport));

        let urls: Vec<String> = (0..20).map(|i| format!("https://example.com/{i}")).collect();
        let result = client
            .analyze_urls(&urls, "compare", "gemini-3-flash-preview", "en")
            .await;

        assert!(result.error.is_none());
        assert_eq!(transport.generate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_url_retrieval_status_is_mapped() {
        let transport = Arc::new(FakeTransport::with_generate(common::generate_response(
            json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "analysis" }] },
                    "urlContextMetadata": {
                        "urlMetadata": [
                            {
                                "retrievedUrl": "https://a.example",
                                "urlRetrievalStatus": "URL_RETRIEVAL_STATUS_SUCCESS"
                            },
                            {
                                "retrievedUrl": "https://b.example",
                                "urlRetrievalStatus": "URL_RETRIEVAL_STATUS_ERROR"
                            }
                        ]
                    }
                }]
            }),
        )));
        let client = client(Arc::clone(&transport));

        let urls = vec!["https://a.example".to_string(), "https://b.example".to_string()];
        let result = client
            .analyze_urls(&urls, "compare", "gemini-3-flash-preview", "en")
            .await;

        assert_eq!(result.content, "analysis");
        assert_eq!(result.url_metadata.len(), 2);
        assert_eq!(result.url_metadata[0].status, "URL_RETRIEVAL_STATUS_SUCCESS");
        assert_eq!(result.url_metadata[1].url, "https://b.example");
        assert!(result.url_metadata.iter().all(|m| m.title.is_none()));

        let call = transport.last_generate.lock().unwrap().clone().unwrap();
        assert_eq!(call.tools, vec![ToolConfig::UrlContext]);
        assert!(call.prompt.contains("URLs:\nhttps://a.example\nhttps://b.example"));
    }
}

// ============================================================================
// Search + Analyze Tests
// ============================================================================

mod search_and_analyze_tests {
    use super::*;

    #[tokio::test]
    async fn test_enables_both_tools_and_appends_reference_urls() {
        let transport = Arc::new(FakeTransport::with_generate(
            common::generate_response(json!({ "candidates": [] })),
        ));
        let client = client(Arc::clone(&transport));

        let urls = vec!["https://a.example".to_string()];
        client
            .search_and_analyze("q", &urls, "gemini-3-flash-preview", "en")
            .await;

        let call = transport.last_generate.lock().unwrap().clone().unwrap();
        assert_eq!(
            call.tools,
            vec![ToolConfig::GoogleSearch, ToolConfig::UrlContext]
        );
        assert!(call.prompt.contains("参考URL:\nhttps://a.example"));
    }

    #[tokio::test]
    async fn test_without_urls_prompt_is_plain_query() {
        let transport = Arc::new(FakeTransport::with_generate(
            common::generate_response(json!({ "candidates": [] })),
        ));
        let client = client(Arc::clone(&transport));

        client
            .search_and_analyze("q", &[], "gemini-3-flash-preview", "en")
            .await;

        let call = transport.last_generate.lock().unwrap().clone().unwrap();
        assert_eq!(call.prompt, "q");
    }
}
