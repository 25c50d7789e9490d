// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Quick search commands (quick-search, analyze-urls, search-analyze)

use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::client::QuickSearchClient;
use crate::format;
use crate::models::QuickSearchResult;

use super::write_output;

fn print_search_result(result: &QuickSearchResult, output: Option<&Path>) -> Result<()> {
    if let Some(error) = &result.error {
        eprintln!("{} {}", "[!]".red(), error);
        return Ok(());
    }

    if let Some(path) = output {
        return write_output(path, &format::render_quick_search(result));
    }

    println!("{}", result.content);

    if !result.citations.is_empty() {
        println!("\n{}", "Citations:".cyan().bold());
        for (i, citation) in result.citations.iter().enumerate() {
            match &citation.title {
                Some(title) => println!("  {}. {} - {}", i + 1, title, citation.url.dimmed()),
                None => println!("  {}. {}", i + 1, citation.url),
            }
        }
    }

    if !result.search_queries.is_empty() {
        println!(
            "\n{} {}",
            "Search queries:".dimmed(),
            result.search_queries.join(", ").dimmed()
        );
    }

    Ok(())
}

/// Quick web search with Google Search grounding.
pub async fn quick_search(
    query: &str,
    model: &str,
    language: &str,
    output: Option<&Path>,
) -> Result<()> {
    let client = QuickSearchClient::from_env()?;
    let result = client.quick_search(query, model, language).await;
    print_search_result(&result, output)
}

/// Analyze content from specific URLs.
pub async fn analyze_urls(
    query: &str,
    urls: &[String],
    model: &str,
    language: &str,
    output: Option<&Path>,
) -> Result<()> {
    let client = QuickSearchClient::from_env()?;
    let result = client.analyze_urls(urls, query, model, language).await;

    if let Some(error) = &result.error {
        eprintln!("{} {}", "[!]".red(), error);
        return Ok(());
    }

    if let Some(path) = output {
        return write_output(path, &format::render_url_analysis(&result));
    }

    println!("{}", result.content);

    if !result.url_metadata.is_empty() {
        println!("\n{}", "URL retrieval status:".cyan().bold());
        for meta in &result.url_metadata {
            let mark = if meta.status == format::URL_RETRIEVAL_SUCCESS {
                "[ok]".green()
            } else {
                "[failed]".red()
            };
            println!("  {} {}", mark, meta.url);
        }
    }

    Ok(())
}

/// Web search combined with URL context analysis.
pub async fn search_analyze(
    query: &str,
    urls: &[String],
    model: &str,
    language: &str,
    output: Option<&Path>,
) -> Result<()> {
    let client = QuickSearchClient::from_env()?;
    let result = client.search_and_analyze(query, urls, model, language).await;
    print_search_result(&result, output)
}
