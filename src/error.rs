// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Error types for grt

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrtError {
    #[error(
        "API key is required. Set the GEMINI_API_KEY environment variable or pass api_key explicitly"
    )]
    MissingApiKey,

    #[error("Remote API error: {0}")]
    Remote(String),

    #[error(
        "Research did not complete within {timeout_secs} seconds. Interaction ID: {interaction_id}"
    )]
    Timeout {
        interaction_id: String,
        timeout_secs: u64,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GrtError>;
