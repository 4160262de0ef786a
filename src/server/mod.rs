//! HTTP boundary for brief generation
//!
//! Routes:
//! - `POST /` (also `/api/generate` and `/.netlify/functions/generate`) - brief → `{ "result": ... }`
//! - `OPTIONS` on the same paths - CORS preflight
//! - `GET /health` - liveness probe

mod handlers;

use crate::client::Director;
use crate::config::DirectorConfig;
use crate::Result;
use axum::{
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use handlers::{ALLOW_HEADERS, ALLOW_METHODS};

// ============================================================================
// Server State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub director: Arc<Director>,
}

// ============================================================================
// Routes
// ============================================================================

/// Paths the generate handler is mounted on. The Netlify path keeps existing front ends working.
pub const GENERATE_PATHS: [&str; 3] = ["/", "/api/generate", "/.netlify/functions/generate"];

/// Create the router with all endpoints
pub fn create_router(director: Arc<Director>) -> Router {
    let mut router = Router::new().route("/health", get(handlers::health_handler));
    for path in GENERATE_PATHS {
        router = router.route(path, any(handlers::generate_handler));
    }
    router
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { director })
}

/// Run the HTTP server until Ctrl-C.
pub async fn run(config: DirectorConfig) -> Result<()> {
    let addr = config.bind_addr;
    let director = crate::client::DirectorBuilder::from_config(config).build()?;
    info!(
        locale = %director.locale(),
        tiers = ?director.invoker().resolver().policy().tiers(),
        "director ready"
    );

    let app = create_router(Arc::new(director));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        crate::Error::configuration(format!("cannot bind {}: {}", addr, e))
    })?;
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| crate::Error::configuration(format!("server error: {}", e)))?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
