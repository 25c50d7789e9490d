// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! CLI argument definitions using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gemini Research Tools (grt) - Deep research and grounded search from the terminal
#[derive(Parser)]
#[command(name = "grt")]
#[command(author = "Nervosys")]
#[command(version)]
#[command(about = "Run Gemini deep research and grounded quick searches", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // ============================================================================
    // Deep Research Commands
    // ============================================================================
    /// Run a deep research task (takes minutes; polls until done)
    Research {
        /// Research topic or question
        query: String,

        /// Stream progress (thoughts and partial text) instead of polling
        #[arg(long)]
        stream: bool,

        /// Output formatting instructions passed to the agent
        #[arg(short, long)]
        format: Option<String>,

        /// Maximum seconds to wait for completion
        #[arg(long, default_value_t = 3600)]
        timeout: u64,

        /// Seconds between status polls
        #[arg(long, default_value_t = 10)]
        poll_interval: u64,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the status of a research task
    Status {
        /// Interaction ID returned by `grt research` or the dashboard
        interaction_id: String,
    },

    /// Fetch the result of a research task
    Result {
        /// Interaction ID of the research task
        interaction_id: String,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ask a follow-up question about completed research
    Followup {
        /// Interaction ID of the completed research
        interaction_id: String,

        /// Follow-up question
        question: String,
    },

    // ============================================================================
    // Quick Search Commands
    // ============================================================================
    /// Quick web search with Google Search grounding (seconds)
    #[command(visible_alias = "qs")]
    QuickSearch {
        /// Search query
        query: String,

        /// Model to use
        #[arg(short, long, default_value = "gemini-3-flash-preview")]
        model: String,

        /// Response language
        #[arg(short, long, default_value = "ja")]
        language: String,

        /// Write the answer to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze content from specific URLs (max 20)
    AnalyzeUrls {
        /// Analysis query or instructions
        query: String,

        /// URL to analyze (repeatable)
        #[arg(short, long = "url", required = true)]
        urls: Vec<String>,

        /// Model to use
        #[arg(short, long, default_value = "gemini-3-flash-preview")]
        model: String,

        /// Response language
        #[arg(short, long, default_value = "ja")]
        language: String,

        /// Write the analysis to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Web search combined with URL context analysis
    SearchAnalyze {
        /// Search and analysis query
        query: String,

        /// URL to include as context (repeatable)
        #[arg(short, long = "url")]
        urls: Vec<String>,

        /// Model to use
        #[arg(short, long, default_value = "gemini-3-flash-preview")]
        model: String,

        /// Response language
        #[arg(short, long, default_value = "ja")]
        language: String,

        /// Write the answer to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    // ============================================================================
    // Dashboard Commands
    // ============================================================================
    /// Start the browser dashboard server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8787")]
        port: u16,
    },
}
