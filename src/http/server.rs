//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with its middleware layers
//! - Collect the request body and hand the request to the dispatch core
//! - Serialize the core's response back onto the wire
//! - Graceful shutdown on ctrl-c
//!
//! # Design Decisions
//! - A catch-all route feeds every request into the dispatcher; unmatched
//!   paths are the dispatcher's 404, not Axum's
//! - The dispatch core runs synchronously once the body is in memory; the
//!   only awaits here are body intake and response writing

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::header::{HeaderName, HeaderValue},
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::http::request::{Request as ApiRequest, RequestIdLayer, X_REQUEST_ID};
use crate::http::response::{ApiError, Response as ApiResponse};
use crate::observability::metrics;

/// Application state injected into the catch-all handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub body_limit: usize,
}

/// HTTP server wrapping the dispatch core.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server around a built dispatcher.
    pub fn new(config: AppConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let state = AppState {
            dispatcher,
            body_limit: config.listener.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(engine_entry))
            .route("/", any(engine_entry))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Catch-all entry: wire request in, engine response out.
async fn engine_entry(
    State(state): State<AppState>,
    request: axum::extract::Request,
) -> axum::response::Response {
    let started = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_string();
    let target = parts.uri.to_string();

    tracing::debug!(
        method = %method,
        path = %path,
        request_id = request_id.as_deref().unwrap_or("unknown"),
        "dispatching request"
    );

    // 1. Await the inbound body.
    let body_bytes = match collect_body(body, state.body_limit).await {
        Ok(bytes) => bytes,
        Err(response) => {
            metrics::record_request(method.as_str(), response.status.as_u16(), started);
            return response.into_response();
        }
    };

    // 2. Run the dispatch core.
    let api_request = ApiRequest {
        method: parts.method,
        path,
        target,
        headers: parts.headers,
        body: body_bytes,
    };
    let mut api_response = state.dispatcher.dispatch(&api_request);

    // 3. Echo the correlation id and record the outcome.
    if let Some(id) = request_id {
        if let Ok(value) = HeaderValue::from_str(&id) {
            api_response
                .headers
                .insert(HeaderName::from_static(X_REQUEST_ID), value);
        }
    }
    metrics::record_request(api_request.method.as_str(), api_response.status.as_u16(), started);

    api_response.into_response()
}

async fn collect_body(body: Body, limit: usize) -> Result<Option<Vec<u8>>, ApiResponse> {
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) if bytes.is_empty() => Ok(None),
        Ok(bytes) => Ok(Some(bytes.to_vec())),
        Err(err) => {
            tracing::debug!(error = %err, "failed to read request body");
            Err(ApiError::BadRequest("unable to read request body".to_string()).into())
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
