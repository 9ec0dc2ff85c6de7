// 🌐 HTTP API
// JSON endpoints over the rule engine, served by bin/server.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::check::compute_check;
use crate::location::filter_input;
use crate::phonetic::render_phonetic;
use crate::rules::{ClassificationResult, RuleEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RuleEngine>,
}

impl AppState {
    pub fn new(engine: RuleEngine) -> Self {
        AppState { engine: Arc::new(engine) }
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Filter a path segment; an empty result is a client error
fn filtered_code(raw: &str) -> Result<String, Response> {
    let code = filter_input(raw);
    if code.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::err(format!("No location code in {:?}", raw))),
        )
            .into_response());
    }
    if code != raw {
        debug!(input = %raw, code = %code, "input filtered");
    }
    Ok(code)
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/locations/:code - Phonetic and check for one code
async fn get_location(State(state): State<AppState>, Path(raw): Path<String>) -> Response {
    match filtered_code(&raw) {
        Ok(code) => Json(ApiResponse::ok(state.engine.interpret(&code))).into_response(),
        Err(response) => response,
    }
}

/// POST /api/locations - Interpret a batch of codes
async fn post_locations(
    State(state): State<AppState>,
    Json(codes): Json<Vec<String>>,
) -> impl IntoResponse {
    let results: Vec<ClassificationResult> = codes
        .iter()
        .map(|raw| state.engine.interpret(&filter_input(raw)))
        .collect();

    Json(ApiResponse::ok(results))
}

/// GET /api/phonetic/:code - Generic rendering only
async fn get_phonetic(Path(raw): Path<String>) -> Response {
    match filtered_code(&raw) {
        Ok(code) => Json(ApiResponse::ok(render_phonetic(&code))).into_response(),
        Err(response) => response,
    }
}

/// GET /api/check/:code - Check word only
async fn get_check(Path(raw): Path<String>) -> Response {
    match filtered_code(&raw) {
        Ok(code) => Json(ApiResponse::ok(compute_check(&code))).into_response(),
        Err(response) => response,
    }
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// Full application router
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/locations", axum::routing::post(post_locations))
        .route("/locations/:code", get(get_location))
        .route("/phonetic/:code", get(get_phonetic))
        .route("/check/:code", get(get_check))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
