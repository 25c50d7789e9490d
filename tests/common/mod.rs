//! Shared test fixtures
//!
//! A scripted in-memory transport standing in for the Gemini API, plus
//! helpers for building wire-shaped responses from JSON literals.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream;
use serde_json::{json, Value};

use grt::error::{GrtError, Result};
use grt::gemini::{
    ChunkStream, GeminiTransport, GenerateContentResponse, Interaction, InteractionRequest,
    StreamChunk, ToolConfig,
};

/// Arguments of the last `generate_content` call
#[derive(Debug, Clone)]
pub struct GenerateCall {
    pub model: String,
    pub prompt: String,
    pub tools: Vec<ToolConfig>,
}

/// Scripted transport: tests queue responses, clients consume them.
#[derive(Default)]
pub struct FakeTransport {
    pub create_response: Mutex<Option<Interaction>>,
    /// Responses for `get_interaction`; the last entry repeats once the
    /// queue runs down to it.
    pub get_responses: Mutex<VecDeque<Interaction>>,
    pub stream_chunks: Mutex<Vec<StreamChunk>>,
    pub generate_response: Mutex<Option<std::result::Result<GenerateContentResponse, String>>>,

    pub create_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,

    pub last_create: Mutex<Option<InteractionRequest>>,
    pub last_generate: Mutex<Option<GenerateCall>>,
}

impl FakeTransport {
    pub fn with_create(interaction: Interaction) -> Self {
        let transport = Self::default();
        *transport.create_response.lock().unwrap() = Some(interaction);
        transport
    }

    pub fn with_get_sequence(interactions: Vec<Interaction>) -> Self {
        let transport = Self::default();
        *transport.get_responses.lock().unwrap() = interactions.into();
        transport
    }

    pub fn with_stream(chunks: Vec<StreamChunk>) -> Self {
        let transport = Self::default();
        *transport.stream_chunks.lock().unwrap() = chunks;
        transport
    }

    pub fn with_generate(response: GenerateContentResponse) -> Self {
        let transport = Self::default();
        *transport.generate_response.lock().unwrap() = Some(Ok(response));
        transport
    }

    pub fn with_generate_error(message: &str) -> Self {
        let transport = Self::default();
        *transport.generate_response.lock().unwrap() = Some(Err(message.to_string()));
        transport
    }

    pub fn queue_get(&self, interaction: Interaction) {
        self.get_responses.lock().unwrap().push_back(interaction);
    }
}

#[async_trait]
impl GeminiTransport for FakeTransport {
    async fn create_interaction(&self, request: InteractionRequest) -> Result<Interaction> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let response = self.create_response.lock().unwrap().clone();
        *self.last_create.lock().unwrap() = Some(request);
        response.ok_or_else(|| GrtError::Remote("no scripted create response".to_string()))
    }

    async fn get_interaction(&self, _interaction_id: &str) -> Result<Interaction> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.get_responses.lock().unwrap();
        if queue.len() > 1 {
            Ok(queue.pop_front().expect("non-empty queue"))
        } else {
            queue
                .front()
                .cloned()
                .ok_or_else(|| GrtError::Remote("no scripted get response".to_string()))
        }
    }

    async fn stream_interaction(&self, _request: InteractionRequest) -> Result<ChunkStream> {
        let chunks: Vec<StreamChunk> = self.stream_chunks.lock().unwrap().drain(..).collect();
        Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        tools: &[ToolConfig],
    ) -> Result<GenerateContentResponse> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_generate.lock().unwrap() = Some(GenerateCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            tools: tools.to_vec(),
        });
        match self.generate_response.lock().unwrap().take() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(GrtError::Remote(message)),
            None => Err(GrtError::Remote("no scripted generate response".to_string())),
        }
    }
}

// =============================================================================
// Wire-shape builders
// =============================================================================

pub fn interaction(value: Value) -> Interaction {
    serde_json::from_value(value).expect("valid interaction JSON")
}

pub fn chunk(value: Value) -> StreamChunk {
    serde_json::from_value(value).expect("valid stream chunk JSON")
}

pub fn generate_response(value: Value) -> GenerateContentResponse {
    serde_json::from_value(value).expect("valid generateContent JSON")
}

pub fn in_progress(id: &str) -> Interaction {
    interaction(json!({ "id": id, "status": "in_progress" }))
}

pub fn completed(id: &str, text: &str, citations: &[&str]) -> Interaction {
    let chunks: Vec<Value> = citations
        .iter()
        .map(|url| json!({ "web": { "uri": url } }))
        .collect();
    interaction(json!({
        "id": id,
        "status": "completed",
        "outputs": [
            {
                "text": text,
                "groundingMetadata": { "groundingChunks": chunks }
            }
        ]
    }))
}

pub fn failed(id: &str, message: &str) -> Interaction {
    interaction(json!({
        "id": id,
        "status": "failed",
        "error": { "message": message }
    }))
}
