//! Tests for the MCP server
//!
//! Exercises the JSON-RPC dispatch and tool-call surface with scripted
//! transports behind the toolkit. The server must answer every request,
//! turning tool failures into error results rather than crashing.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use serde_json::{json, Value};

use common::FakeTransport;
use grt::agent::AgentToolkit;
use grt::client::{DeepResearchClient, QuickSearchClient};
use grt::mcp::types::JsonRpcRequest;
use grt::mcp::{McpServer, McpTools};

fn server_with(
    research: Arc<FakeTransport>,
    quick: Arc<FakeTransport>,
) -> McpServer {
    let toolkit = AgentToolkit::with_clients(
        DeepResearchClient::with_transport(research),
        QuickSearchClient::with_transport(quick),
    )
    .unwrap();
    McpServer::new(McpTools::new(toolkit))
}

fn request(value: Value) -> JsonRpcRequest {
    serde_json::from_value(value).unwrap()
}

fn respond(server: &McpServer, value: Value) -> Value {
    serde_json::to_value(server.handle_request(request(value))).unwrap()
}

// ============================================================================
// Protocol Tests
// ============================================================================

mod protocol_tests {
    use super::*;

    #[test]
    fn test_initialize_reports_server_info() {
        let server = server_with(
            Arc::new(FakeTransport::default()),
            Arc::new(FakeTransport::default()),
        );

        let response = respond(
            &server,
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        );

        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], "grt-mcp");
        assert!(response["result"]["capabilities"]["tools"].is_object());
    }

    #[test]
    fn test_tools_list_exposes_all_seven_tools() {
        let server = server_with(
            Arc::new(FakeTransport::default()),
            Arc::new(FakeTransport::default()),
        );

        let response = respond(
            &server,
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list", "params": {} }),
        );

        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[test]
    fn test_ping_and_unknown_method() {
        let server = server_with(
            Arc::new(FakeTransport::default()),
            Arc::new(FakeTransport::default()),
        );

        let pong = respond(
            &server,
            json!({ "jsonrpc": "2.0", "id": 3, "method": "ping" }),
        );
        assert_eq!(pong["result"], json!({}));

        let missing = respond(
            &server,
            json!({ "jsonrpc": "2.0", "id": 4, "method": "resources/list" }),
        );
        assert_eq!(missing["error"]["code"], -32601);
    }
}

// ============================================================================
// Tool Call Tests
// ============================================================================

mod tool_call_tests {
    use super::*;

    fn call(server: &McpServer, name: &str, arguments: Value) -> Value {
        respond(
            server,
            json!({
                "jsonrpc": "2.0",
                "id": 10,
                "method": "tools/call",
                "params": { "name": name, "arguments": arguments }
            }),
        )
    }

    #[test]
    fn test_unknown_tool_is_an_error_result() {
        let server = server_with(
            Arc::new(FakeTransport::default()),
            Arc::new(FakeTransport::default()),
        );

        let response = call(&server, "not_a_tool", json!({}));
        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Unknown tool"));
    }

    #[test]
    fn test_missing_required_param_makes_no_network_call() {
        let quick = Arc::new(FakeTransport::default());
        let server = server_with(Arc::new(FakeTransport::default()), Arc::clone(&quick));

        let response = call(&server, "quick_search", json!({}));

        assert_eq!(response["result"]["isError"], true);
        assert_eq!(quick.generate_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_deep_research_default_is_fire_and_forget() {
        let research = Arc::new(FakeTransport::with_create(common::in_progress(
            "interactions/abc",
        )));
        let server = server_with(Arc::clone(&research), Arc::new(FakeTransport::default()));

        let response = call(&server, "deep_research", json!({ "query": "topic" }));

        assert!(response["result"]["isError"].is_null());
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["interaction_id"], "interactions/abc");
        assert_eq!(payload["status"], "in_progress");
        // Submitted once, never polled
        assert_eq!(research.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(research.get_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failed_status_flows_through_as_error_payload() {
        let research = Arc::new(FakeTransport::with_get_sequence(vec![common::failed(
            "interactions/abc",
            "quota exceeded",
        )]));
        let server = server_with(research, Arc::new(FakeTransport::default()));

        let response = call(
            &server,
            "get_research_status",
            json!({ "interaction_id": "interactions/abc" }),
        );

        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["status"], "failed");
        assert_eq!(payload["error"], "quota exceeded");
    }

    #[test]
    fn test_quick_search_returns_structured_payload() {
        let quick = Arc::new(FakeTransport::with_generate(common::generate_response(
            json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "answer" }] },
                    "groundingMetadata": {
                        "groundingChunks": [{ "web": { "uri": "https://a.example" } }]
                    }
                }]
            }),
        )));
        let server = server_with(Arc::new(FakeTransport::default()), quick);

        let response = call(&server, "quick_search", json!({ "query": "q" }));

        assert!(response["result"]["isError"].is_null());
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["content"], "answer");
        assert_eq!(payload["citations"][0]["url"], "https://a.example");
        assert_eq!(payload["model"], "gemini-3-flash-preview");
    }

    #[test]
    fn test_invalid_params_shape_is_a_jsonrpc_error() {
        let server = server_with(
            Arc::new(FakeTransport::default()),
            Arc::new(FakeTransport::default()),
        );

        let response = respond(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 11,
                "method": "tools/call",
                "params": { "no_name": true }
            }),
        );
        assert_eq!(response["error"]["code"], -32602);
    }
}
