// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Deep research commands (research, status, result, followup)

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use colored::*;
use futures_util::StreamExt;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::client::DeepResearchClient;
use crate::format;
use crate::models::{ResearchEventType, ResearchResult, ResearchStatus};

use super::write_output;

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Interaction ID")]
    interaction_id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Error")]
    error: String,
}

fn print_result(result: &ResearchResult, output: Option<&Path>) -> Result<()> {
    match result.status {
        ResearchStatus::Completed => {
            let content = result.content.as_deref().unwrap_or_default();
            if let Some(path) = output {
                write_output(path, &format::render_research_result(result))?;
            } else {
                println!("{}", content);
                if let Some(citations) = &result.citations {
                    println!("\n{}", "Citations:".cyan().bold());
                    for (i, url) in citations.iter().enumerate() {
                        println!("  {}. {}", i + 1, url);
                    }
                }
            }
        }
        ResearchStatus::InProgress => {
            println!(
                "{} Research still in progress: {}",
                "[*]".blue(),
                result.interaction_id
            );
        }
        ResearchStatus::Failed | ResearchStatus::Cancelled => {
            eprintln!(
                "{} Research {}: {}",
                "[!]".red(),
                result.status,
                result.error.as_deref().unwrap_or("no error message")
            );
        }
    }
    Ok(())
}

/// Run a deep research task and wait for the report.
pub async fn research(
    query: &str,
    format_instructions: Option<&str>,
    timeout_secs: u64,
    poll_interval_secs: u64,
    output: Option<&Path>,
) -> Result<()> {
    let client = DeepResearchClient::from_env()?;

    println!("{} Starting deep research...", "[*]".blue());
    let interaction_id = client.start_research(query, format_instructions).await?;
    println!("    Interaction ID: {}", interaction_id.cyan());
    println!(
        "    Polling every {}s (timeout {}s). Press Ctrl+C to detach;\n    resume later with: grt result {}",
        poll_interval_secs, timeout_secs, interaction_id
    );

    let result = client
        .poll_until_complete(
            &interaction_id,
            Duration::from_secs(poll_interval_secs),
            Duration::from_secs(timeout_secs),
        )
        .await?;

    println!();
    print_result(&result, output)
}

/// Run a deep research task, streaming thoughts and text as they arrive.
pub async fn research_stream(
    query: &str,
    format_instructions: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let client = DeepResearchClient::from_env()?;
    let mut events = client.stream_research(query, format_instructions).await?;

    // Fallback content when the complete event carries none
    let mut deltas = String::new();
    let mut final_content: Option<String> = None;

    while let Some(event) = events.next().await {
        match event.event_type {
            ResearchEventType::Start => {
                println!(
                    "{} Research started: {}",
                    "[*]".blue(),
                    event.interaction_id.as_deref().unwrap_or("?").cyan()
                );
            }
            ResearchEventType::Thought => {
                if let Some(thought) = &event.content {
                    println!("{} {}", "[thought]".dimmed(), thought.dimmed());
                }
            }
            ResearchEventType::TextDelta => {
                if let Some(text) = &event.content {
                    deltas.push_str(text);
                }
            }
            ResearchEventType::Complete => {
                final_content = event.content.clone();
                break;
            }
            ResearchEventType::Error => {
                eprintln!(
                    "{} {}",
                    "[!]".red(),
                    event.content.as_deref().unwrap_or("Unknown error")
                );
                return Ok(());
            }
        }
    }

    let content = final_content.unwrap_or(deltas);
    println!();
    match output {
        Some(path) => write_output(path, &content)?,
        None => println!("{}", content),
    }
    Ok(())
}

/// Check the status of a research task.
pub async fn status(interaction_id: &str) -> Result<()> {
    let client = DeepResearchClient::from_env()?;
    let report = client.get_status(interaction_id).await?;

    let row = StatusRow {
        interaction_id: report.interaction_id.clone(),
        status: report.status.to_string(),
        error: report.error.clone().unwrap_or_else(|| "-".to_string()),
    };
    let table = Table::new(vec![row])
        .with(TableStyle::ascii_rounded())
        .to_string();
    println!("{}", table);
    Ok(())
}

/// Fetch the result of a research task.
pub async fn result(interaction_id: &str, output: Option<&Path>) -> Result<()> {
    let client = DeepResearchClient::from_env()?;
    let result = client.get_result(interaction_id).await?;
    print_result(&result, output)
}

/// Ask a follow-up question about completed research.
pub async fn followup(interaction_id: &str, question: &str) -> Result<()> {
    let client = DeepResearchClient::from_env()?;
    let answer = client.ask_followup(interaction_id, question).await?;

    if answer.is_empty() {
        println!("{} No answer returned.", "[!]".yellow());
    } else {
        println!("{}", answer);
    }
    Ok(())
}
