use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::backend::DynNewsBackend;
use crate::config::Settings;
use crate::envelope::{self, Envelope, FailureKind};
use crate::query;

#[derive(Clone)]
pub struct AppState {
    pub backend: DynNewsBackend,
    pub settings: Arc<Settings>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings);

    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/api/news", get(get_news))
        .route("/api/headlines", get(get_headlines))
        .route("/api/search/{topic}", get(search_by_topic))
        .route("/api/news/query", post(query_news))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    match settings.cors_origins() {
        None => CorsLayer::very_permissive(),
        Some(origins) => {
            let origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Transport-level news query input. Also the POST body shape.
#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    pub query: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HeadlineParams {
    pub category: Option<String>,
    pub country: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopicParams {
    pub country: Option<String>,
    pub language: Option<String>,
    pub limit: Option<u32>,
}

async fn get_news(State(state): State<AppState>, Query(p): Query<NewsParams>) -> Response {
    let req = query::news_query(p.query, p.category, p.country, p.language, p.limit);
    respond(&state, state.backend.fetch_news(&req).await)
}

async fn query_news(State(state): State<AppState>, Json(p): Json<NewsParams>) -> Response {
    let req = query::news_query(p.query, p.category, p.country, p.language, p.limit);
    respond(&state, state.backend.fetch_news(&req).await)
}

async fn get_headlines(
    State(state): State<AppState>,
    Query(p): Query<HeadlineParams>,
) -> Response {
    let req = query::headline_query(p.category, p.country, p.limit);
    respond(&state, state.backend.fetch_headlines(&req).await)
}

async fn search_by_topic(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    Query(p): Query<TopicParams>,
) -> Response {
    let req = match query::topic_query(&topic, p.country, p.language, p.limit) {
        Ok(req) => req,
        // Bad caller input never reaches the backend.
        Err(err) => return respond(&state, Envelope::invalid(&err)),
    };
    respond(&state, state.backend.search_by_topic(&req).await)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let upstream = state.backend.health_check().await;
    Json(json!({
        "status": "ok",
        "service": state.settings.app_name,
        "version": state.settings.app_version,
        "environment": state.settings.env,
        "upstream": {
            "backend": state.backend.name(),
            "result": upstream,
        },
        "timestamp": envelope::now_iso(),
    }))
}

async fn service_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": state.settings.app_name,
        "version": state.settings.app_version,
        "description": "Thin news/search gateway with pluggable upstream backends",
        "endpoints": {
            "health": "/health",
            "news": "/api/news",
            "headlines": "/api/headlines",
            "search": "/api/search/{topic}",
            "query": "/api/news/query (POST)",
        },
    }))
}

async fn not_found(uri: Uri) -> Response {
    let body = json!({
        "success": false,
        "error": {
            "message": "Route not found",
            "details": uri.path(),
        },
        "timestamp": envelope::now_iso(),
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Map the envelope onto a transport status and serialize it. Diagnostic
/// details leave the process only in development environments.
fn respond(state: &AppState, mut envelope: Envelope) -> Response {
    let status = match envelope.kind() {
        None => StatusCode::OK,
        Some(FailureKind::Validation) => StatusCode::BAD_REQUEST,
        Some(FailureKind::UpstreamStatus) => StatusCode::BAD_GATEWAY,
        Some(FailureKind::Unreachable) => StatusCode::GATEWAY_TIMEOUT,
        Some(FailureKind::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if !state.settings.is_development() {
        envelope.redact_details();
    }
    (status, Json(envelope)).into_response()
}
