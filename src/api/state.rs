// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Application state for the dashboard server

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::{DeepResearchClient, QuickSearchClient};

/// One submitted research task, kept in memory for the session
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub interaction_id: String,
    pub query: String,
    pub started_at: DateTime<Utc>,
}

/// Shared application state
pub struct AppState {
    pub research: DeepResearchClient,
    pub quick: QuickSearchClient,
    /// Tasks submitted through this server instance. Not persisted;
    /// lost on restart.
    pub history: Mutex<Vec<HistoryEntry>>,
}

impl AppState {
    pub fn new(research: DeepResearchClient, quick: QuickSearchClient) -> Self {
        Self {
            research,
            quick,
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn record_task(&self, interaction_id: &str, query: &str) {
        if let Ok(mut history) = self.history.lock() {
            history.push(HistoryEntry {
                interaction_id: interaction_id.to_string(),
                query: query.to_string(),
                started_at: Utc::now(),
            });
        }
    }
}
