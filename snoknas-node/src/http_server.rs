//! HTTP Server for the dashboard
//!
//! This module provides:
//! - `GET /api/disks`: physical disk health from the disk collector
//! - `GET /api/system`: host status and the collector mode
//! - Static file serving for the dashboard UI, or an API-only banner when the
//!   UI is not installed

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    extract::State,
    http::{StatusCode, header, Method},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use snoknas_disks::{DiskRecord, DiskStatusCollector};
use tokio::fs;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    services::ServeDir,
};
use tracing::{info, error, debug};

use crate::host::{HostSampler, SystemStatus};

/// Shared state for HTTP handlers
pub struct AppState {
    /// Disk collector (mode fixed at startup)
    pub collector: Arc<DiskStatusCollector>,
    /// CPU/memory sampler for the system endpoint
    pub host: HostSampler,
    /// Path to dashboard static files
    pub webui_path: PathBuf,
}

impl AppState {
    pub fn new(collector: Arc<DiskStatusCollector>, webui_path: impl Into<PathBuf>) -> Self {
        Self {
            collector,
            host: HostSampler::new(),
            webui_path: webui_path.into(),
        }
    }
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Serialize)]
struct ApiError {
    error: String,
    message: String,
}

impl ApiError {
    fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Serialize)]
struct DisksResponse {
    disks: Vec<DiskRecord>,
}

// ============================================================================
// Server
// ============================================================================

/// Serve the dashboard on `addr` until Ctrl-C.
pub async fn run_http_server(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_app_router(state);

    info!(address = %addr, "Starting HTTP server for dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}

/// Build the application router with all routes
pub fn build_app_router(state: Arc<AppState>) -> Router {
    // CORS configuration for dashboard development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/disks", get(get_disks))
        .route("/system", get(get_system))
        .with_state(state.clone());

    let webui_path = state.webui_path.clone();
    let webui_exists = webui_path.join("index.html").exists();
    if webui_exists {
        info!(path = %webui_path.display(), "Serving dashboard from static files");
    } else {
        info!(path = %webui_path.display(), "Dashboard files not found, API-only mode");
    }

    let app = if webui_exists {
        Router::new()
            .nest("/api", api_routes)
            .nest_service("/static", ServeDir::new(webui_path.join("static")))
            .fallback(get(serve_index))
            .with_state(state)
    } else {
        Router::new()
            .nest("/api", api_routes)
            .fallback(get(api_only_fallback))
            .with_state(state)
    };

    app
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Static File Handlers
// ============================================================================

/// Serve index.html for `/` and SPA routes
async fn serve_index(
    State(state): State<Arc<AppState>>,
) -> Response {
    let index_path = state.webui_path.join("index.html");
    read_index(&index_path).await
}

async fn read_index(index_path: &Path) -> Response {
    match fs::read(index_path).await {
        Ok(contents) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            contents,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, path = %index_path.display(), "Failed to read index.html");
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/html")],
                "<h1>Dashboard not found</h1><p>The SnokNAS dashboard is not installed.</p>",
            )
                .into_response()
        }
    }
}

/// Fallback for API-only mode
async fn api_only_fallback() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "SnokNAS Node Daemon API",
            "version": env!("CARGO_PKG_VERSION"),
            "webui": false,
            "endpoints": ["/api/disks", "/api/system"]
        }))
    )
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/disks - Physical disks with SMART health
async fn get_disks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DisksResponse>, (StatusCode, Json<ApiError>)> {
    let collector = state.collector.clone();

    // lsblk and smartctl block; keep them off the async workers
    match tokio::task::spawn_blocking(move || collector.collect()).await {
        Ok(disks) => {
            debug!(count = disks.len(), "Returning disk list");
            Ok(Json(DisksResponse { disks }))
        }
        Err(e) => {
            error!(error = %e, "Disk collection task failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("internal_error", &e.to_string())),
            ))
        }
    }
}

/// GET /api/system - Host status and collector mode
async fn get_system(
    State(state): State<Arc<AppState>>,
) -> Json<SystemStatus> {
    let mode = state.collector.mode().to_string();
    Json(state.host.sample(&mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use snoknas_disks::CollectorMode;
    use tower::ServiceExt;

    fn dummy_state(webui_path: &Path) -> Arc<AppState> {
        let collector = Arc::new(DiskStatusCollector::new(CollectorMode::Dummy));
        Arc::new(AppState::new(collector, webui_path))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_disks_endpoint() {
        let app = build_app_router(dummy_state(Path::new("/nonexistent/webui")));
        let (status, body) = get_json(app, "/api/disks").await;

        assert_eq!(status, StatusCode::OK);
        let disks = body["disks"].as_array().unwrap();
        assert_eq!(disks.len(), 8);
        assert_eq!(disks[0]["name"], "sda");
        assert_eq!(disks[5]["health"], "WARNING");
        assert_eq!(disks[5]["smartStatus"], "Degraded");
        assert_eq!(disks[2]["temperature"], 56);
        assert_eq!(disks[7]["kind"], "SSD");
    }

    #[tokio::test]
    async fn test_system_endpoint() {
        let app = build_app_router(dummy_state(Path::new("/nonexistent/webui")));
        let (status, body) = get_json(app, "/api/system").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "Dummy");
        assert_eq!(body["os"], "SnokOS/Linux");
        for key in ["cpu_percent", "memory_percent", "hostname", "platform", "version", "uptime"] {
            assert!(body.get(key).is_some(), "missing key {key}");
        }
    }

    #[tokio::test]
    async fn test_api_only_fallback() {
        let app = build_app_router(dummy_state(Path::new("/nonexistent/webui")));
        let (status, body) = get_json(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["webui"], false);
    }

    #[tokio::test]
    async fn test_serves_index_when_installed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>SnokNAS</html>").unwrap();
        let app = build_app_router(dummy_state(dir.path()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>SnokNAS</html>");
    }

    #[tokio::test]
    async fn test_serves_static_assets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        std::fs::create_dir(dir.path().join("static")).unwrap();
        std::fs::write(dir.path().join("static").join("app.js"), "console.log(1)").unwrap();
        let app = build_app_router(dummy_state(dir.path()));

        let response = app
            .oneshot(Request::builder().uri("/static/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"console.log(1)");
    }
}
