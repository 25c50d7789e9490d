// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Client layer over the Gemini API
//!
//! Two thin clients sit under every front-end:
//!
//! - [`DeepResearchClient`] - long-running research tasks (minutes),
//!   with polling and streaming retrieval
//! - [`QuickSearchClient`] - grounded answers and URL analysis (seconds)
//!
//! Both are stateless beyond their configuration; every call creates
//! fresh value records. A single instance may be used concurrently.

pub mod quick_search;
pub mod research;

pub use quick_search::QuickSearchClient;
pub use research::{DeepResearchClient, EventStream};

use crate::error::{GrtError, Result};

/// Resolve the API key from an explicit value or the environment.
pub(crate) fn resolve_api_key(api_key: Option<String>) -> Result<String> {
    api_key
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .filter(|key| !key.is_empty())
        .ok_or(GrtError::MissingApiKey)
}
