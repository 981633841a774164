//! nmask REST API server.
//!
//! Provides HTTP endpoints over the masking engine. Every request carries its
//! own mask configuration; the server holds no per-field state.
//!
//! Run with: `cargo run --bin nmask-server --features server`
//!
//! Environment variables:
//! - `NMASK_PORT` - Port to listen on (default: 8080)
//! - `NMASK_HOST` - Host to bind to (default: 0.0.0.0)
//! - `NMASK_API_TOKEN` - Bearer token for authentication (optional, if set all requests require it)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nmask::mask::config::RawMaskConfig;
use nmask::{
    EditEvent, MaskConfig, canonicalize, clamp_selection, format_display, reconcile_edit,
};

/// Server configuration from environment.
#[derive(Clone)]
struct Config {
    port: u16,
    host: String,
    api_token: Option<String>,
}

impl Config {
    fn from_env() -> Self {
        Self {
            port: std::env::var("NMASK_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            host: std::env::var("NMASK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_token: std::env::var("NMASK_API_TOKEN")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nmask_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    if config.api_token.is_some() {
        tracing::info!("API token authentication enabled");
    } else {
        tracing::warn!("No NMASK_API_TOKEN set - API is unauthenticated");
    }

    let shared_config = Arc::new(config);

    let app = Router::new()
        .route("/health", get(health))
        .route("/canonicalize", post(canonicalize_handler))
        .route("/format", post(format_handler))
        .route("/reconcile", post(reconcile_handler))
        .route("/clamp", post(clamp_handler))
        .with_state(shared_config)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("nmask-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
struct CanonicalizeRequest {
    #[serde(default)]
    config: RawMaskConfig,
    text: String,
}

#[derive(Deserialize)]
struct FormatRequest {
    #[serde(default)]
    config: RawMaskConfig,
    value: String,
    #[serde(default)]
    preserve_trailing_separator: bool,
}

#[derive(Deserialize)]
struct ReconcileRequest {
    #[serde(default)]
    config: RawMaskConfig,
    #[serde(default)]
    previous_display: String,
    event: EditEvent,
}

#[derive(Deserialize)]
struct ClampRequest {
    #[serde(default)]
    config: RawMaskConfig,
    display: String,
    start: usize,
    end: Option<usize>,
}

/// Reduce raw display text to its canonical value.
async fn canonicalize_handler(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Json(request): Json<CanonicalizeRequest>,
) -> Response {
    let mask = match authorize_and_build(&config, &headers, request.config) {
        Ok(mask) => mask,
        Err(response) => return response,
    };
    let value = canonicalize(&request.text, &mask);
    Json(serde_json::json!({ "canonical_value": value })).into_response()
}

/// Render a canonical value.
async fn format_handler(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Json(request): Json<FormatRequest>,
) -> Response {
    let mask = match authorize_and_build(&config, &headers, request.config) {
        Ok(mask) => mask,
        Err(response) => return response,
    };
    let display = format_display(&request.value, &mask, request.preserve_trailing_separator);
    Json(serde_json::json!({ "display_value": display })).into_response()
}

/// Reconcile one keystroke.
///
/// Accepts JSON with:
/// - `config`: (optional) mask options, same names as the JS library
/// - `previous_display`: (optional) display before the edit
/// - `event`: `{ "raw_text": ..., "caret_offset": ... }`
async fn reconcile_handler(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Json(request): Json<ReconcileRequest>,
) -> Response {
    let mask = match authorize_and_build(&config, &headers, request.config) {
        Ok(mask) => mask,
        Err(response) => return response,
    };
    let reconciled = reconcile_edit(&request.previous_display, &request.event, &mask);
    tracing::debug!(shape = reconciled.shape.as_str(), "reconcile request");
    Json(reconciled).into_response()
}

/// Clamp a caret or selection out of the decoration.
async fn clamp_handler(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Json(request): Json<ClampRequest>,
) -> Response {
    let mask = match authorize_and_build(&config, &headers, request.config) {
        Ok(mask) => mask,
        Err(response) => return response,
    };
    let end = request.end.unwrap_or(request.start);
    Json(clamp_selection(&request.display, &mask, request.start, end)).into_response()
}

/// Check the bearer token (if configured) and validate the mask options.
#[allow(clippy::result_large_err)]
fn authorize_and_build(
    config: &Config,
    headers: &HeaderMap,
    raw: RawMaskConfig,
) -> Result<MaskConfig, Response> {
    if let Some(expected_token) = &config.api_token {
        let auth_header = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let provided_token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .unwrap_or("");

        if provided_token != expected_token {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid or missing bearer token".to_string(),
                }),
            )
                .into_response());
        }
    }

    MaskConfig::try_from(raw).map_err(|err| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: format!("Invalid mask config: {err}"),
            }),
        )
            .into_response()
    })
}
