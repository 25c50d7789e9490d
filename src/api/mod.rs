// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! HTTP server for the browser dashboard
//!
//! Serves a single-page dashboard at `/` and a REST API under `/api`
//! for submitting research tasks, polling them, and running quick
//! searches. Uses Actix-web for the HTTP server.

mod handlers;
mod state;

pub use state::{AppState, HistoryEntry};

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;

use crate::client::{DeepResearchClient, QuickSearchClient};

/// Dashboard server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:5173".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    use handlers::*;

    cfg.route("/", web::get().to(dashboard)).service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .route("/research", web::post().to(start_research))
            .route("/research/{id}/status", web::get().to(research_status))
            .route("/research/{id}/result", web::get().to(research_result))
            .route("/followup", web::post().to(followup))
            .route("/search", web::post().to(quick_search))
            .route("/analyze", web::post().to(analyze_urls))
            .route("/search-analyze", web::post().to(search_and_analyze))
            .route("/history", web::get().to(history)),
    );
}

/// Start the dashboard server
pub async fn start_server(config: ServerConfig, api_key: Option<String>) -> Result<()> {
    let state = web::Data::new(AppState::new(
        DeepResearchClient::new(api_key.clone())?,
        QuickSearchClient::new(api_key)?,
    ));
    let cors_origins = config.cors_origins.clone();

    println!("[*] GRT Dashboard starting...");
    println!("   Address: http://{}:{}", config.host, config.port);
    println!();
    println!("[*] API endpoints:");
    println!("   POST /api/research              - Start a research task");
    println!("   GET  /api/research/:id/status   - Check research status");
    println!("   GET  /api/research/:id/result   - Fetch research result");
    println!("   POST /api/followup              - Ask a follow-up question");
    println!("   POST /api/search                - Quick search");
    println!("   POST /api/analyze               - Analyze URLs");
    println!("   POST /api/search-analyze        - Search with URL context");
    println!("   GET  /api/history               - Tasks submitted this session");
    println!();
    println!("Press Ctrl+C to stop the server...");
    println!();

    let server = HttpServer::new(move || {
        let origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origin_str = origin.to_str().unwrap_or("");
                origins.iter().any(|allowed| allowed == origin_str)
                    || origin_str.starts_with("http://localhost:")
                    || origin_str.starts_with("http://127.0.0.1:")
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Content-Type", "Accept"])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    });

    let server = server.bind((config.host.as_str(), config.port))?;
    server.run().await?;

    Ok(())
}
