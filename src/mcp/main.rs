// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! GRT MCP Server - Entry point
//!
//! This binary provides a Model Context Protocol (MCP) server interface
//! for the Gemini research tools, enabling AI agents to run deep
//! research tasks and grounded quick searches.
//!
//! # Usage
//!
//! The server communicates via stdio (stdin/stdout) using JSON-RPC 2.0
//! and reads the API key from `GEMINI_API_KEY`.
//!
//! ## Available Tools
//!
//! - `deep_research` - Run comprehensive research (optionally blocking)
//! - `get_research_status` - Check a research task's status
//! - `get_research_result` - Fetch a completed research report
//! - `ask_followup_question` - Follow up on completed research
//! - `quick_search` - Fast search with Google Search grounding
//! - `analyze_urls` - Analyze content from specific URLs
//! - `search_and_analyze` - Combined search + URL analysis
//!
//! # Configuration
//!
//! Add to your MCP client configuration (e.g., Claude Desktop):
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "grt": {
//!       "command": "grt-mcp",
//!       "args": [],
//!       "env": { "GEMINI_API_KEY": "..." }
//!     }
//!   }
//! }
//! ```

use grt::agent::AgentToolkit;
use grt::mcp::{McpServer, McpTools};

fn main() {
    let toolkit = match AgentToolkit::from_env() {
        Ok(toolkit) => toolkit,
        Err(e) => {
            eprintln!("[grt-mcp] Startup error: {}", e);
            std::process::exit(1);
        }
    };

    let server = McpServer::new(McpTools::new(toolkit));

    if let Err(e) = server.run() {
        eprintln!("[grt-mcp] Server error: {}", e);
        std::process::exit(1);
    }
}
