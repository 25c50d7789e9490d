// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Deep research client
//!
//! Wraps the Gemini Interactions API into a small lifecycle: submit a
//! research task in background mode, then poll or stream until it
//! reaches a terminal state. No retries are performed here; callers
//! that want them wrap these operations themselves.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{Stream, StreamExt};

use super::resolve_api_key;
use crate::error::{GrtError, Result};
use crate::gemini::wire::AgentConfig;
use crate::gemini::{HttpClientConfig, HttpTransport, Interaction, InteractionRequest};
use crate::gemini::GeminiTransport;
use crate::models::{
    ResearchEvent, ResearchEventType, ResearchResult, ResearchStatus, StatusReport,
};

/// Lazy, single-pass stream of research events. Non-restartable.
pub type EventStream = Pin<Box<dyn Stream<Item = ResearchEvent> + Send>>;

/// Client for the Gemini Deep Research agent
pub struct DeepResearchClient {
    transport: Arc<dyn GeminiTransport>,
}

impl DeepResearchClient {
    pub const AGENT_NAME: &'static str = "deep-research-pro-preview-12-2025";
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3600);

    // 日本語回答を指示するシステムプロンプト
    const SYSTEM_PROMPT_JA: &'static str =
        "必ず日本語で回答してください。推論過程や思考の要約も日本語で出力してください。";

    /// Create a client. Falls back to `GEMINI_API_KEY` when no key is
    /// passed; fails with `GrtError::MissingApiKey` if neither exists.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = resolve_api_key(api_key)?;
        let transport = HttpTransport::new(api_key, &HttpClientConfig::deep_research())?;
        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(None)
    }

    /// Build a client over a custom transport (tests, proxies).
    pub fn with_transport(transport: Arc<dyn GeminiTransport>) -> Self {
        Self { transport }
    }

    fn build_input(query: &str, format_instructions: Option<&str>) -> String {
        let mut parts = vec![Self::SYSTEM_PROMPT_JA, query];
        if let Some(instructions) = format_instructions {
            parts.push(instructions);
        }
        parts.join("\n\n")
    }

    /// Start a research task in background mode and return its
    /// interaction ID.
    pub async fn start_research(
        &self,
        query: &str,
        format_instructions: Option<&str>,
    ) -> Result<String> {
        let input = Self::build_input(query, format_instructions);
        let interaction = self
            .transport
            .create_interaction(InteractionRequest::background(input, Self::AGENT_NAME))
            .await?;
        log::info!("research started: {}", interaction.id);
        Ok(interaction.id)
    }

    /// Fetch the current status of a research task. One network round
    /// trip, never blocks beyond it.
    pub async fn get_status(&self, interaction_id: &str) -> Result<StatusReport> {
        let interaction = self.transport.get_interaction(interaction_id).await?;
        Ok(StatusReport {
            interaction_id: interaction_id.to_string(),
            status: ResearchStatus::from_remote(&interaction.status),
            error: interaction.error_message(),
        })
    }

    /// Fetch the current result of a research task. Content and
    /// citations are present only once the task completed.
    pub async fn get_result(&self, interaction_id: &str) -> Result<ResearchResult> {
        let interaction = self.transport.get_interaction(interaction_id).await?;
        Ok(Self::result_from(interaction_id, &interaction))
    }

    fn result_from(interaction_id: &str, interaction: &Interaction) -> ResearchResult {
        let status = ResearchStatus::from_remote(&interaction.status);

        let (content, citations) = if status == ResearchStatus::Completed {
            let urls = interaction.citation_urls();
            (
                interaction.last_text(),
                if urls.is_empty() { None } else { Some(urls) },
            )
        } else {
            (None, None)
        };

        ResearchResult {
            interaction_id: interaction_id.to_string(),
            status,
            content,
            citations,
            error: interaction.error_message(),
        }
    }

    /// Poll until the task reaches a terminal state.
    ///
    /// Fixed-interval loop: at least `poll_interval` between checks, no
    /// backoff. Returns the result for completed tasks, a result
    /// carrying the remote error for failed/cancelled ones, and raises
    /// `GrtError::Timeout` once `timeout` of local waiting has elapsed.
    /// The timeout never cancels the remote task.
    pub async fn poll_until_complete(
        &self,
        interaction_id: &str,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<ResearchResult> {
        let start = tokio::time::Instant::now();

        loop {
            let status = self.get_status(interaction_id).await?;

            match status.status {
                ResearchStatus::Completed => return self.get_result(interaction_id).await,
                ResearchStatus::Failed | ResearchStatus::Cancelled => {
                    return Ok(ResearchResult {
                        interaction_id: interaction_id.to_string(),
                        status: status.status,
                        content: None,
                        citations: None,
                        error: status.error,
                    });
                }
                ResearchStatus::InProgress => {}
            }

            if start.elapsed() >= timeout {
                return Err(GrtError::Timeout {
                    interaction_id: interaction_id.to_string(),
                    timeout_secs: timeout.as_secs(),
                });
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Convenience composition of `start_research` + `poll_until_complete`.
    pub async fn research(
        &self,
        query: &str,
        format_instructions: Option<&str>,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<ResearchResult> {
        let interaction_id = self.start_research(query, format_instructions).await?;
        self.poll_until_complete(&interaction_id, poll_interval, timeout)
            .await
    }

    /// Stream research progress as it happens.
    ///
    /// The returned stream yields at most one `Start`, interleaved
    /// `Thought`/`TextDelta` events, and terminates after exactly one
    /// `Complete` or `Error`.
    pub async fn stream_research(
        &self,
        query: &str,
        format_instructions: Option<&str>,
    ) -> Result<EventStream> {
        let input = Self::build_input(query, format_instructions);
        let mut request = InteractionRequest::background(input, Self::AGENT_NAME);
        request.stream = true;
        request.agent_config = Some(AgentConfig::deep_research());

        let mut chunks = self.transport.stream_interaction(request).await?;
        let transport = Arc::clone(&self.transport);

        let stream = async_stream::stream! {
            let mut interaction_id: Option<String> = None;
            let mut last_event_id: Option<String> = None;

            while let Some(chunk) = chunks.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield ResearchEvent {
                            event_type: ResearchEventType::Error,
                            interaction_id: interaction_id.clone(),
                            content: Some(e.to_string()),
                            event_id: last_event_id.clone(),
                        };
                        return;
                    }
                };

                if let Some(event_id) = &chunk.event_id {
                    last_event_id = Some(event_id.clone());
                }

                match chunk.event_type.as_str() {
                    "interaction.start" => {
                        if let Some(interaction) = &chunk.interaction {
                            interaction_id = Some(interaction.id.clone());
                            yield ResearchEvent {
                                event_type: ResearchEventType::Start,
                                interaction_id: interaction_id.clone(),
                                content: None,
                                event_id: last_event_id.clone(),
                            };
                        }
                    }
                    "content.delta" => {
                        let Some(delta) = &chunk.delta else { continue };
                        match delta.delta_type.as_str() {
                            "text" => {
                                if let Some(text) = &delta.text {
                                    yield ResearchEvent {
                                        event_type: ResearchEventType::TextDelta,
                                        interaction_id: interaction_id.clone(),
                                        content: Some(text.clone()),
                                        event_id: last_event_id.clone(),
                                    };
                                }
                            }
                            "thought_summary" => {
                                if let Some(thought) = delta.thought_text() {
                                    yield ResearchEvent {
                                        event_type: ResearchEventType::Thought,
                                        interaction_id: interaction_id.clone(),
                                        content: Some(thought),
                                        event_id: last_event_id.clone(),
                                    };
                                }
                            }
                            _ => {}
                        }
                    }
                    "interaction.complete" => {
                        let mut final_content = chunk
                            .interaction
                            .as_ref()
                            .and_then(|interaction| interaction.last_text());

                        // The completion chunk may omit the final text;
                        // fall back to one fetch, swallowing its failure.
                        if final_content.is_none() {
                            if let Some(id) = &interaction_id {
                                if let Ok(interaction) = transport.get_interaction(id).await {
                                    final_content =
                                        Self::result_from(id, &interaction).content;
                                }
                            }
                        }

                        yield ResearchEvent {
                            event_type: ResearchEventType::Complete,
                            interaction_id: interaction_id.clone(),
                            content: final_content,
                            event_id: last_event_id.clone(),
                        };
                        return;
                    }
                    "error" => {
                        let message = chunk
                            .error
                            .map(|e| e.message)
                            .unwrap_or_else(|| "Unknown error".to_string());
                        yield ResearchEvent {
                            event_type: ResearchEventType::Error,
                            interaction_id: interaction_id.clone(),
                            content: Some(message),
                            event_id: last_event_id.clone(),
                        };
                        return;
                    }
                    _ => {}
                }
            }
        };

        Ok(Box::pin(stream))
    }

    /// Ask a follow-up question about a completed research task.
    ///
    /// Returns the first non-empty textual output of the new turn, or
    /// an empty string if the turn produced none.
    pub async fn ask_followup(
        &self,
        previous_interaction_id: &str,
        question: &str,
    ) -> Result<String> {
        let interaction = self
            .transport
            .create_interaction(InteractionRequest::followup(
                question.to_string(),
                Self::AGENT_NAME,
                previous_interaction_id,
            ))
            .await?;
        Ok(interaction.last_text().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_input_with_format_instructions() {
        let input = DeepResearchClient::build_input("topic", Some("use a table"));
        let parts: Vec<&str> = input.split("\n\n").collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1], "topic");
        assert_eq!(parts[2], "use a table");
    }

    #[test]
    fn test_build_input_without_format_instructions() {
        let input = DeepResearchClient::build_input("topic", None);
        let parts: Vec<&str> = input.split("\n\n").collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1], "topic");
    }
}
