//! HTTP server setup and the per-request handler.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Normalize plain-HTTP requests to HTTPS before resolution
//! - Drive host → directive resolution and pick the terminal response
//!
//! # Design Decisions
//! - One catch-all route; only the URL is inspected, any method accepted
//! - Scheme is taken from X-Forwarded-Proto when present, since production
//!   deployments sit behind a TLS terminator
//! - Lookup failures surface as 502 rather than an opaque 500

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RedirectorConfig;
use crate::dns::doh::DohClient;
use crate::http::response;
use crate::observability::metrics;
use crate::redirect::resolver::RedirectResolver;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: RedirectResolver,
}

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
    config: RedirectorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RedirectorConfig) -> Result<Self, reqwest::Error> {
        let doh = DohClient::new(&config.resolver)?;
        let state = AppState {
            resolver: RedirectResolver::new(doh),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RedirectorConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(redirect_handler))
            .route("/", any(redirect_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RedirectorConfig {
        &self.config
    }
}

/// Main request handler.
/// Upgrades plain HTTP, resolves the host, and builds the response.
async fn redirect_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let Some(host) = request_host(&request) else {
        metrics::record_request("bad_request", start_time);
        return (StatusCode::BAD_REQUEST, "Missing Host header").into_response();
    };
    let host = host.to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        host = %host,
        path = %path,
        "Resolving request"
    );

    // Plain HTTP on the default port upgrades to HTTPS before any lookup.
    if request_scheme(&request) == "http" && !host.contains(':') {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let location = format!("https://{host}{target}");
        metrics::record_request("upgraded", start_time);
        return response::https_upgrade(&location);
    }

    match state.resolver.resolve(&host, &path).await {
        Ok(Some(directive)) => {
            tracing::info!(
                request_id = %request_id,
                host = %host,
                location = %directive.location,
                ttl = directive.ttl,
                "Redirecting"
            );
            metrics::record_request("redirected", start_time);
            response::redirect(&directive)
        }
        Ok(None) => {
            tracing::warn!(request_id = %request_id, host = %host, "No redirect record found");
            metrics::record_request("not_found", start_time);
            response::not_found(&host)
        }
        Err(err) => {
            tracing::error!(request_id = %request_id, host = %host, error = %err, "DNS lookup failed");
            metrics::record_request("lookup_failed", start_time);
            response::lookup_failed()
        }
    }
}

/// Effective request scheme.
///
/// X-Forwarded-Proto wins when present; absolute-form URIs come next;
/// otherwise the request is assumed to have arrived over HTTPS.
fn request_scheme(request: &Request<Body>) -> &str {
    request
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().scheme_str())
        .unwrap_or("https")
}

/// Requested host, including any explicit port.
fn request_host(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().host())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
