// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Gemini Research Tools (grt) - Library
//!
//! Thin clients for the Gemini deep research and grounded search APIs,
//! plus the front-end surfaces built on top of them.
//!
//! ## Clients
//!
//! - [`client::DeepResearchClient`] - long-running research tasks with
//!   polling and streaming retrieval
//! - [`client::QuickSearchClient`] - grounded quick search and URL
//!   analysis (seconds-scale)
//!
//! ## Front-ends
//!
//! - **CLI** (`grt`) - research, status, result, followup, quick-search,
//!   analyze-urls, search-analyze, serve
//! - **Agent tools** ([`agent::AgentToolkit`]) - blocking JSON-map
//!   bindings for agent frameworks
//! - **Plugin tools** ([`plugin::PluginTools`]) - dual JSON + text
//!   message envelopes for workflow runtimes
//! - **MCP server** (`grt-mcp`) - JSON-RPC 2.0 over stdio
//! - **Dashboard** (`grt serve`) - actix-web REST API + embedded UI
//!
//! ```rust,ignore
//! use grt::client::DeepResearchClient;
//!
//! let client = DeepResearchClient::from_env()?;
//! let id = client.start_research("EV battery market trends", None).await?;
//! let result = client
//!     .poll_until_complete(
//!         &id,
//!         DeepResearchClient::DEFAULT_POLL_INTERVAL,
//!         DeepResearchClient::DEFAULT_TIMEOUT,
//!     )
//!     .await?;
//! ```

pub mod agent;
pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod format;
pub mod gemini;
pub mod mcp;
pub mod models;
pub mod plugin;

// Re-export commonly used items
pub use client::{DeepResearchClient, EventStream, QuickSearchClient};
pub use error::{GrtError, Result};
pub use models::{
    Citation, GroundingSupport, QuickSearchResult, ResearchEvent, ResearchEventType,
    ResearchResult, ResearchStatus, StatusReport, UrlAnalysisResult, UrlMetadata,
};
