// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Google Gemini API boundary
//!
//! Wire types and the transport seam for the two remote surfaces this
//! crate talks to: the Interactions API (long-running deep research) and
//! `generateContent` with search/URL-context tools (quick search).

pub mod transport;
pub mod wire;

pub use transport::{ChunkStream, GeminiTransport, HttpClientConfig, HttpTransport};
pub use wire::{
    GenerateContentResponse, Interaction, InteractionRequest, StreamChunk, ToolConfig,
};
