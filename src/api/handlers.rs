// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Dashboard API request and response handlers

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::client::QuickSearchClient;

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    fn error(message: &str) -> HttpResponse {
        HttpResponse::InternalServerError().json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message.to_string()),
        })
    }

    fn bad_request(message: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message.to_string()),
        })
    }
}

// =============================================================================
// Request Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    pub query: String,
    pub format_instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FollowupRequest {
    pub previous_interaction_id: String,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub model: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub urls: Vec<String>,
    pub query: String,
    pub model: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchAnalyzeRequest {
    pub query: String,
    #[serde(default)]
    pub urls: Vec<String>,
    pub model: Option<String>,
    pub language: Option<String>,
}

// =============================================================================
// Health Check
// =============================================================================

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// =============================================================================
// Research Handlers
// =============================================================================

/// Submit a research task. Returns the interaction ID immediately; the
/// dashboard polls for status and result.
pub async fn start_research(
    state: web::Data<AppState>,
    body: web::Json<ResearchRequest>,
) -> impl Responder {
    if body.query.trim().is_empty() {
        return ApiResponse::<()>::bad_request("query is required");
    }

    match state
        .research
        .start_research(&body.query, body.format_instructions.as_deref())
        .await
    {
        Ok(interaction_id) => {
            state.record_task(&interaction_id, &body.query);
            ApiResponse::success(serde_json::json!({
                "interaction_id": interaction_id,
                "status": "in_progress",
            }))
        }
        Err(e) => ApiResponse::<()>::error(&e.to_string()),
    }
}

pub async fn research_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    match state.research.get_status(&path).await {
        Ok(status) => ApiResponse::success(status),
        Err(e) => ApiResponse::<()>::error(&e.to_string()),
    }
}

pub async fn research_result(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    match state.research.get_result(&path).await {
        Ok(result) => ApiResponse::success(result),
        Err(e) => ApiResponse::<()>::error(&e.to_string()),
    }
}

pub async fn followup(
    state: web::Data<AppState>,
    body: web::Json<FollowupRequest>,
) -> impl Responder {
    if body.question.trim().is_empty() {
        return ApiResponse::<()>::bad_request("question is required");
    }

    match state
        .research
        .ask_followup(&body.previous_interaction_id, &body.question)
        .await
    {
        Ok(answer) => ApiResponse::success(serde_json::json!({
            "previous_interaction_id": body.previous_interaction_id,
            "question": body.question,
            "answer": answer,
        })),
        Err(e) => ApiResponse::<()>::error(&e.to_string()),
    }
}

// =============================================================================
// Quick Search Handlers
// =============================================================================

fn model_of(model: &Option<String>) -> &str {
    model.as_deref().unwrap_or(QuickSearchClient::DEFAULT_MODEL)
}

fn language_of(language: &Option<String>) -> &str {
    language.as_deref().unwrap_or("ja")
}

pub async fn quick_search(
    state: web::Data<AppState>,
    body: web::Json<SearchRequest>,
) -> impl Responder {
    if body.query.trim().is_empty() {
        return ApiResponse::<()>::bad_request("query is required");
    }
    let result = state
        .quick
        .quick_search(&body.query, model_of(&body.model), language_of(&body.language))
        .await;
    ApiResponse::success(result)
}

pub async fn analyze_urls(
    state: web::Data<AppState>,
    body: web::Json<AnalyzeRequest>,
) -> impl Responder {
    if body.urls.is_empty() {
        return ApiResponse::<()>::bad_request("urls is required");
    }
    if body.query.trim().is_empty() {
        return ApiResponse::<()>::bad_request("query is required");
    }
    let result = state
        .quick
        .analyze_urls(
            &body.urls,
            &body.query,
            model_of(&body.model),
            language_of(&body.language),
        )
        .await;
    ApiResponse::success(result)
}

pub async fn search_and_analyze(
    state: web::Data<AppState>,
    body: web::Json<SearchAnalyzeRequest>,
) -> impl Responder {
    if body.query.trim().is_empty() {
        return ApiResponse::<()>::bad_request("query is required");
    }
    let result = state
        .quick
        .search_and_analyze(
            &body.query,
            &body.urls,
            model_of(&body.model),
            language_of(&body.language),
        )
        .await;
    ApiResponse::success(result)
}

// =============================================================================
// History
// =============================================================================

pub async fn history(state: web::Data<AppState>) -> impl Responder {
    match state.history.lock() {
        Ok(history) => ApiResponse::success(history.clone()),
        Err(_) => ApiResponse::<()>::error("history unavailable"),
    }
}

// =============================================================================
// Dashboard
// =============================================================================

pub async fn dashboard() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("dashboard.html"))
}
