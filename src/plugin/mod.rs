// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Workflow-plugin tool surface
//!
//! Plugin runtimes consume tool output as a pair of parallel messages:
//! a structured JSON payload for downstream nodes and a formatted text
//! rendering for language models. Every invocation - including one that
//! fails parameter validation - emits exactly that pair.

pub mod tools;

pub use tools::PluginTools;

use serde_json::Value;

/// One message emitted by a plugin tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolMessage {
    /// Structured payload for workflow consumption
    Json(Value),
    /// Human/LLM-readable rendering of the same payload
    Text(String),
}

impl ToolMessage {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ToolMessage::Json(value) => Some(value),
            ToolMessage::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ToolMessage::Json(_) => None,
            ToolMessage::Text(text) => Some(text),
        }
    }
}
