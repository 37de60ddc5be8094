use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use axum::{middleware::from_fn, routing::get, Extension, Router};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

pub mod request_id;
pub mod web;

use messaging::domain::service::Service;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Process-level facts reported by the status endpoints.
pub struct AppInfo {
    pub environment: String,
    started_at: Instant,
}

impl AppInfo {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            started_at: Instant::now(),
        }
    }

    /// Fractional seconds since startup.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

/// Build the full HTTP surface: status endpoints, messaging routes, and the
/// middleware stack.
pub fn build_router(service: Arc<Service>, info: Arc<AppInfo>, cors_enabled: bool) -> Router {
    let mut router = Router::new()
        .route("/health", get(web::health))
        .route("/", get(web::root))
        .route("/api/v1", get(web::api_info))
        .merge(messaging::api::rest::routes::router(service.clone()))
        .layer(Extension(service))
        .layer(Extension(info));

    let x_request_id = request_id::header();

    // Layers added first sit innermost; the request id must exist before the
    // trace span reads it, and the span before the extensions middleware
    // records into it.
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));
    router = router.layer(request_id::create_trace_layer());
    router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

    router = router.layer(TimeoutLayer::new(REQUEST_TIMEOUT));

    if cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router = router.layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    router
}

/// Bind and serve until ctrl-c or SIGTERM.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("HTTP server shutting down gracefully");
}
