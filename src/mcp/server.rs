// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! MCP Server - stdio transport over JSON-RPC 2.0

use serde_json::json;
use std::io::{self, BufRead, Write};

use super::tools::{self, McpTools};
use super::types::*;

/// First 100 characters of a message, for stderr diagnostics.
/// Char-based so multibyte (Japanese) payloads never split mid-char.
fn preview(message: &str) -> String {
    message.chars().take(100).collect()
}

/// MCP server for the research tools
pub struct McpServer {
    tools: McpTools,
}

impl McpServer {
    pub fn new(tools: McpTools) -> Self {
        Self { tools }
    }

    /// Run the MCP server using stdio transport
    pub fn run(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        eprintln!("[grt-mcp] Server starting...");

        for line in stdin.lock().lines() {
            let line = line?;

            if line.is_empty() {
                continue;
            }

            eprintln!("[grt-mcp] Received: {}", preview(&line));

            match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => {
                    let response = self.handle_request(request);
                    let response_str = serde_json::to_string(&response)?;
                    eprintln!("[grt-mcp] Sending: {}", preview(&response_str));
                    writeln!(stdout, "{}", response_str)?;
                    stdout.flush()?;
                }
                Err(e) => {
                    eprintln!("[grt-mcp] Parse error: {}", e);
                    let error_response =
                        JsonRpcResponse::error(None, -32700, format!("Parse error: {}", e));
                    writeln!(stdout, "{}", serde_json::to_string(&error_response)?)?;
                    stdout.flush()?;
                }
            }
        }

        Ok(())
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" => {
                // Notification, no response needed
                JsonRpcResponse::success(request.id, json!({}))
            }
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "grt-mcp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(request.id, -32603, e.to_string()),
        }
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = tools::list_tools();
        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params: Result<CallToolParams, _> = serde_json::from_value(request.params.clone());

        match params {
            Ok(params) => {
                let result = self.tools.call_tool(&params.name, &params.arguments);
                match serde_json::to_value(result) {
                    Ok(value) => JsonRpcResponse::success(request.id, value),
                    Err(e) => JsonRpcResponse::error(request.id, -32603, e.to_string()),
                }
            }
            Err(e) => JsonRpcResponse::error(request.id, -32602, format!("Invalid params: {}", e)),
        }
    }
}
