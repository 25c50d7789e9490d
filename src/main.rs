// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Gemini Research Tools (grt) - Main entry point
//!
//! A CLI for running Gemini deep research tasks and grounded quick
//! searches. Reads the API key from `GEMINI_API_KEY`.

use anyhow::Result;
use clap::Parser;

use grt::api::{self, ServerConfig};
use grt::cli::{Cli, Commands};
use grt::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // All commands are async; run them on an explicit runtime.
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command {
        // ====================================================================
        // Deep Research Commands
        // ====================================================================
        Commands::Research {
            query,
            stream,
            format,
            timeout,
            poll_interval,
            output,
        } => {
            if stream {
                rt.block_on(commands::research_stream(
                    &query,
                    format.as_deref(),
                    output.as_deref(),
                ))
            } else {
                rt.block_on(commands::research(
                    &query,
                    format.as_deref(),
                    timeout,
                    poll_interval,
                    output.as_deref(),
                ))
            }
        }

        Commands::Status { interaction_id } => rt.block_on(commands::status(&interaction_id)),

        Commands::Result {
            interaction_id,
            output,
        } => rt.block_on(commands::result(&interaction_id, output.as_deref())),

        Commands::Followup {
            interaction_id,
            question,
        } => rt.block_on(commands::followup(&interaction_id, &question)),

        // ====================================================================
        // Quick Search Commands
        // ====================================================================
        Commands::QuickSearch {
            query,
            model,
            language,
            output,
        } => rt.block_on(commands::quick_search(
            &query,
            &model,
            &language,
            output.as_deref(),
        )),

        Commands::AnalyzeUrls {
            query,
            urls,
            model,
            language,
            output,
        } => rt.block_on(commands::analyze_urls(
            &query,
            &urls,
            &model,
            &language,
            output.as_deref(),
        )),

        Commands::SearchAnalyze {
            query,
            urls,
            model,
            language,
            output,
        } => rt.block_on(commands::search_analyze(
            &query,
            &urls,
            &model,
            &language,
            output.as_deref(),
        )),

        // ====================================================================
        // Dashboard Commands
        // ====================================================================
        Commands::Serve { host, port } => {
            let config = ServerConfig {
                host,
                port,
                ..Default::default()
            };
            rt.block_on(api::start_server(config, None))
        }
    }
}
