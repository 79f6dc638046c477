//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the three greeting routes
//! - Wire up middleware (request ID, tracing, timeout, JSON body limit)
//! - Serve on a bound listener until shutdown is signalled

use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handlers::{greet_user, me, not_found, root};
use crate::http::middleware::limit_json_body;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};

/// HTTP server for the greeting routes.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            router: build_router(&config),
        }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once `shutdown` fires (or its sender is dropped) and in-flight
    /// requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Only `GET` (and the implied `HEAD`) is routed. Any other method on a known
/// path gets the same bare 404 as an unknown path.
///
/// `TimeoutLayer` must wrap a service whose response body is `Default`, so it
/// sits directly around the router and JSON limit.
#[allow(deprecated)]
pub fn build_router(config: &ServerConfig) -> Router {
    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "request",
                request_id = %request_id,
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

    Router::new()
        .route("/", get(root).fallback(not_found))
        .route("/me", get(me).fallback(not_found))
        .route("/usr", get(greet_user).fallback(not_found))
        .layer(middleware::from_fn_with_state(
            config.limits.body_limit_bytes,
            limit_json_body,
        ))
        .layer(layers)
}
