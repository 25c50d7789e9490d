// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! MCP (Model Context Protocol) server for the research tools
//!
//! Exposes both clients to AI agents over JSON-RPC 2.0 on stdio:
//! - Start and poll deep research tasks
//! - Ask follow-up questions about completed research
//! - Run grounded quick searches and URL analysis

pub mod server;
pub mod tools;
pub mod types;

pub use server::McpServer;
pub use tools::McpTools;
