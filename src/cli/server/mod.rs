//! HTTP server exposing the scene catalog.
//!
//! Serves the same endpoints the viewer frontend expects from its backend,
//! so a viewer (or another `atmosphere-cli`) can point its HTTP source here.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | / | API banner |
//! | GET | /health | Health check |
//! | GET | /api/scenes | Scene catalog |
//! | GET | /images/... | Image files (`server.images_dir`) |
//! | GET | /audio/... | Audio files (`server.audio_dir`) |
//!
//! All responses allow any origin, so a viewer served from another host can
//! call the API.
//!
//! # Usage
//!
//! ```bash
//! atmosphere-cli --serve --port 8000
//! ```
//!
//! # Feature Flag
//!
//! This module is only available when the `server` feature is enabled.

mod handlers;
pub mod types;

pub use handlers::{AppState, StaticMount};
pub use types::{HealthResponse, RootResponse};

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::source::DEFAULT_ENDPOINT;

/// Start the HTTP server.
///
/// # Arguments
///
/// * `host` - Interface to bind, e.g. "0.0.0.0"
/// * `port` - Port to listen on. Use 0 for a random available port.
/// * `state` - Catalog file and static asset mounts
///
/// # Returns
///
/// The actual bound address and a token that shuts the server down when
/// cancelled.
pub async fn start_server(
    host: &str,
    port: u16,
    state: Arc<AppState>,
) -> anyhow::Result<(SocketAddr, CancellationToken)> {
    let shutdown_token = CancellationToken::new();
    let app = create_router(state);

    let listener = TcpListener::bind((host, port)).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Catalog server listening on {}", actual_addr);

    let server_shutdown = shutdown_token.clone();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(server_shutdown.cancelled_owned())
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((actual_addr, shutdown_token))
}

/// Create the router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(DEFAULT_ENDPOINT, get(handlers::scenes));

    let mut mounted: Vec<&str> = Vec::new();
    for mount in &state.static_mounts {
        let prefix = mount.prefix.trim_end_matches('/');
        // Only local prefixes can be served; a CDN prefix is someone else's job
        if !prefix.starts_with('/') || mounted.contains(&prefix) {
            tracing::warn!("Not serving {:?} under '{}'", mount.dir, mount.prefix);
            continue;
        }
        if !mount.dir.is_dir() {
            tracing::warn!("Static directory {:?} does not exist", mount.dir);
        }

        tracing::info!("Serving {:?} under {}", mount.dir, prefix);
        router = router.nest_service(prefix, ServeDir::new(&mount.dir));
        mounted.push(prefix);
    }

    router.layer(CorsLayer::permissive()).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneCatalog;
    use crate::source::{FileSceneSource, HttpSceneSource, SceneDataSource};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const CATALOG: &str = r#"{
        "scenes": [{
            "id": "harbor",
            "name": "Harbor",
            "weathers": [{
                "id": "rain",
                "name": "Rain",
                "times": [{
                    "id": "night",
                    "name": "Night",
                    "image": "night.png",
                    "atmosphere": { "brightness": 0.4 }
                }]
            }]
        }]
    }"#;

    fn catalog_file(dir: &TempDir) -> FileSceneSource {
        let path = dir.path().join("scenes.json");
        std::fs::write(&path, CATALOG).unwrap();
        FileSceneSource::new(path)
    }

    fn catalog_state(dir: &TempDir) -> Arc<AppState> {
        AppState::new(catalog_file(dir), Vec::new())
    }

    /// Catalog plus `images/harbor/rain/night.png` and `audio/harbor/rain/rain.mp3`.
    fn state_with_assets(dir: &TempDir) -> Arc<AppState> {
        let images = dir.path().join("images");
        let audio = dir.path().join("audio");
        std::fs::create_dir_all(images.join("harbor/rain")).unwrap();
        std::fs::create_dir_all(audio.join("harbor/rain")).unwrap();
        std::fs::write(images.join("harbor/rain/night.png"), b"png bytes").unwrap();
        std::fs::write(audio.join("harbor/rain/rain.mp3"), b"mp3 bytes").unwrap();

        AppState::new(
            catalog_file(dir),
            vec![
                StaticMount::new("/images", images),
                StaticMount::new("/audio", audio),
            ],
        )
    }

    async fn get_bytes(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint_works() {
        let dir = TempDir::new().unwrap();
        let app = create_router(catalog_state(&dir));

        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn root_endpoint_returns_banner() {
        let dir = TempDir::new().unwrap();
        let app = create_router(catalog_state(&dir));

        let (_, body) = get_json(app, "/").await;
        assert_eq!(body["message"], "Atmosphere Viewer API");
    }

    #[tokio::test]
    async fn scenes_endpoint_serves_rewritten_catalog() {
        let dir = TempDir::new().unwrap();
        let app = create_router(catalog_state(&dir));

        let (status, body) = get_json(app, "/api/scenes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scenes"][0]["id"], "harbor");
        assert_eq!(
            body["scenes"][0]["weathers"][0]["times"][0]["image"],
            "/images/harbor/rain/night.png"
        );
    }

    #[tokio::test]
    async fn scenes_endpoint_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let app = create_router(AppState::new(
            FileSceneSource::new(dir.path().join("missing.json")),
            Vec::new(),
        ));

        let (status, body) = get_json(app, "/api/scenes").await;
        assert_eq!(status, StatusCode::OK);
        let catalog: SceneCatalog = serde_json::from_value(body).unwrap();
        assert_eq!(catalog, SceneCatalog::builtin_default());
    }

    #[tokio::test]
    async fn rewritten_asset_paths_are_served() {
        let dir = TempDir::new().unwrap();
        let state = state_with_assets(&dir);

        let (_, catalog) = get_json(create_router(state.clone()), "/api/scenes").await;
        let image = catalog["scenes"][0]["weathers"][0]["times"][0]["image"]
            .as_str()
            .unwrap()
            .to_string();

        let (status, body) = get_bytes(create_router(state.clone()), &image).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"png bytes");

        let (status, body) = get_bytes(create_router(state), "/audio/harbor/rain/rain.mp3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"mp3 bytes");
    }

    #[tokio::test]
    async fn missing_asset_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = create_router(state_with_assets(&dir));

        let (status, _) = get_bytes(app, "/images/harbor/rain/noon.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_local_and_duplicate_prefixes_are_skipped() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("day.png"), b"png bytes").unwrap();

        let state = AppState::new(
            catalog_file(&dir),
            vec![
                StaticMount::new("/images/", &images),
                StaticMount::new("/images", dir.path().join("other")),
                StaticMount::new("https://cdn.example.com/audio", dir.path().join("audio")),
            ],
        );

        let (status, body) = get_bytes(create_router(state.clone()), "/images/day.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"png bytes");

        let (status, _) = get_json(create_router(state), "/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let dir = TempDir::new().unwrap();
        let app = create_router(catalog_state(&dir));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/scenes")
                    .header("origin", "http://192.168.1.20:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let dir = TempDir::new().unwrap();
        let app = create_router(catalog_state(&dir));

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/scenes")
                    .header("origin", "http://192.168.1.20:5173")
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key("access-control-allow-methods"));
    }

    #[test]
    fn static_mounts_follow_settings() {
        let mut settings = crate::settings::ViewerSettings::default();
        settings.assets.images_prefix = "/img".to_string();
        settings.server.audio_dir = "/srv/audio".to_string();

        let mounts = StaticMount::from_settings(&settings);
        assert_eq!(
            mounts,
            vec![
                StaticMount::new("/img", "static/images"),
                StaticMount::new("/audio", "/srv/audio"),
            ]
        );
    }

    #[tokio::test]
    async fn http_source_reads_from_running_server() {
        let dir = TempDir::new().unwrap();
        let (addr, shutdown) = start_server("127.0.0.1", 0, catalog_state(&dir))
            .await
            .expect("Server should start");
        assert!(addr.port() > 0);

        let source =
            HttpSceneSource::new(&format!("http://{}", addr), DEFAULT_ENDPOINT, None).unwrap();
        let catalog = source.fetch_scenes().await.unwrap();
        assert_eq!(catalog.scenes[0].id, "harbor");

        shutdown.cancel();
        assert!(shutdown.is_cancelled());
    }
}
