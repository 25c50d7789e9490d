// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! MCP Tools - Expose the research clients as MCP tools

use serde_json::{json, Value};
use std::collections::HashMap;

use super::types::{CallToolResult, Tool, ToolContent};
use crate::agent::AgentToolkit;
use crate::client::QuickSearchClient;

/// Get the list of available tools
pub fn list_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "deep_research".to_string(),
            description: Some(
                "Run comprehensive research on a topic using the Deep Research agent. \
                 Takes minutes; set wait_for_completion=false to get an interaction_id \
                 back immediately and poll with get_research_status."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Research topic or question"
                    },
                    "format_instructions": {
                        "type": "string",
                        "description": "Optional output formatting instructions"
                    },
                    "wait_for_completion": {
                        "type": "boolean",
                        "description": "Block until the research completes (default: false)"
                    },
                    "timeout": {
                        "type": "integer",
                        "description": "Maximum seconds to wait when blocking (default: 3600)"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "get_research_status".to_string(),
            description: Some("Check the status of a running research task".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "interaction_id": {
                        "type": "string",
                        "description": "Interaction ID returned by deep_research"
                    }
                },
                "required": ["interaction_id"]
            }),
        },
        Tool {
            name: "get_research_result".to_string(),
            description: Some(
                "Fetch the report and citations of a completed research task".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "interaction_id": {
                        "type": "string",
                        "description": "Interaction ID returned by deep_research"
                    }
                },
                "required": ["interaction_id"]
            }),
        },
        Tool {
            name: "ask_followup_question".to_string(),
            description: Some(
                "Ask a follow-up question about a completed research task".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "previous_interaction_id": {
                        "type": "string",
                        "description": "Interaction ID of the completed research"
                    },
                    "question": {
                        "type": "string",
                        "description": "Follow-up question about the report"
                    }
                },
                "required": ["previous_interaction_id", "question"]
            }),
        },
        Tool {
            name: "quick_search".to_string(),
            description: Some(
                "Fast web search with Google Search grounding. Returns in seconds; \
                 use deep_research for comprehensive analysis."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    },
                    "model": {
                        "type": "string",
                        "description": "Model to use (default: gemini-3-flash-preview)"
                    },
                    "language": {
                        "type": "string",
                        "description": "Response language (default: ja)"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "analyze_urls".to_string(),
            description: Some(
                "Fetch and analyze content from specific URLs (max 20 per request)".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "urls": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "URLs to analyze (max 20)"
                    },
                    "query": {
                        "type": "string",
                        "description": "Analysis query or instructions"
                    },
                    "model": {
                        "type": "string",
                        "description": "Model to use (default: gemini-3-flash-preview)"
                    },
                    "language": {
                        "type": "string",
                        "description": "Response language (default: ja)"
                    }
                },
                "required": ["urls", "query"]
            }),
        },
        Tool {
            name: "search_and_analyze".to_string(),
            description: Some(
                "Combine web search grounding with optional URL context analysis".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search and analysis query"
                    },
                    "urls": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Optional URLs to include as context"
                    },
                    "model": {
                        "type": "string",
                        "description": "Model to use (default: gemini-3-flash-preview)"
                    },
                    "language": {
                        "type": "string",
                        "description": "Response language (default: ja)"
                    }
                },
                "required": ["query"]
            }),
        },
    ]
}

/// Tool dispatch over the blocking toolkit
pub struct McpTools {
    toolkit: AgentToolkit,
}

fn payload_result(payload: Value) -> CallToolResult {
    let is_error = payload.get("error").map(|e| !e.is_null()).unwrap_or(false);
    CallToolResult {
        content: vec![ToolContent::Text {
            text: serde_json::to_string_pretty(&payload).unwrap_or_default(),
        }],
        is_error: if is_error { Some(true) } else { None },
    }
}

fn invalid_params(message: &str) -> CallToolResult {
    CallToolResult {
        content: vec![ToolContent::Text {
            text: format!("Error: {}", message),
        }],
        is_error: Some(true),
    }
}

impl McpTools {
    pub fn new(toolkit: AgentToolkit) -> Self {
        Self { toolkit }
    }

    /// Execute a tool call. Failures come back as error results, never
    /// as a crashed server.
    pub fn call_tool(&self, name: &str, arguments: &HashMap<String, Value>) -> CallToolResult {
        let str_arg = |key: &str| arguments.get(key).and_then(|v| v.as_str());
        let urls_arg = |key: &str| -> Vec<String> {
            arguments
                .get(key)
                .and_then(|v| v.as_array())
                .map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect()
                })
                .unwrap_or_default()
        };
        let model = str_arg("model").unwrap_or(QuickSearchClient::DEFAULT_MODEL);
        let language = str_arg("language").unwrap_or("ja");

        match name {
            "deep_research" => {
                let Some(query) = str_arg("query") else {
                    return invalid_params("query is required");
                };
                let format_instructions = str_arg("format_instructions");
                let wait = arguments
                    .get("wait_for_completion")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                let timeout = arguments
                    .get("timeout")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(3600);

                if wait {
                    payload_result(self.toolkit.deep_research(
                        query,
                        format_instructions,
                        timeout,
                    ))
                } else {
                    payload_result(self.toolkit.start_deep_research(query, format_instructions))
                }
            }
            "get_research_status" => {
                let Some(interaction_id) = str_arg("interaction_id") else {
                    return invalid_params("interaction_id is required");
                };
                payload_result(self.toolkit.get_research_status(interaction_id))
            }
            "get_research_result" => {
                let Some(interaction_id) = str_arg("interaction_id") else {
                    return invalid_params("interaction_id is required");
                };
                payload_result(self.toolkit.get_research_result(interaction_id))
            }
            "ask_followup_question" => {
                let Some(previous_interaction_id) = str_arg("previous_interaction_id") else {
                    return invalid_params("previous_interaction_id is required");
                };
                let Some(question) = str_arg("question") else {
                    return invalid_params("question is required");
                };
                payload_result(
                    self.toolkit
                        .ask_followup_question(previous_interaction_id, question),
                )
            }
            "quick_search" => {
                let Some(query) = str_arg("query") else {
                    return invalid_params("query is required");
                };
                payload_result(self.toolkit.quick_search(query, model, language))
            }
            "analyze_urls" => {
                let urls = urls_arg("urls");
                if urls.is_empty() {
                    return invalid_params("urls is required");
                }
                let Some(query) = str_arg("query") else {
                    return invalid_params("query is required");
                };
                payload_result(self.toolkit.analyze_urls(&urls, query, model, language))
            }
            "search_and_analyze" => {
                let Some(query) = str_arg("query") else {
                    return invalid_params("query is required");
                };
                let urls = urls_arg("urls");
                payload_result(self.toolkit.search_and_analyze(query, &urls, model, language))
            }
            _ => CallToolResult {
                content: vec![ToolContent::Text {
                    text: format!("Unknown tool: {}", name),
                }],
                is_error: Some(true),
            },
        }
    }
}
