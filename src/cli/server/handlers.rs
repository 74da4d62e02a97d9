//! HTTP request handlers for the catalog server.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, Json};

use super::types::{HealthResponse, RootResponse};
use crate::scene::SceneCatalog;
use crate::settings::ViewerSettings;
use crate::source::{FileSceneSource, SceneDataSource};

/// A directory served as static files under a URL prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMount {
    /// URL prefix, e.g. "/images"
    pub prefix: String,
    /// Directory on disk
    pub dir: PathBuf,
}

impl StaticMount {
    pub fn new(prefix: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            dir: dir.into(),
        }
    }

    /// The image and audio mounts matching the prefixes catalog paths are
    /// rewritten to.
    pub fn from_settings(settings: &ViewerSettings) -> Vec<Self> {
        vec![
            Self::new(&settings.assets.images_prefix, &settings.server.images_dir),
            Self::new(&settings.assets.audio_prefix, &settings.server.audio_dir),
        ]
    }
}

/// Application state shared across all handlers
pub struct AppState {
    /// Catalog file, re-read on every request so edits show up without a restart
    pub catalog: FileSceneSource,

    /// Asset directories mounted next to the API routes
    pub static_mounts: Vec<StaticMount>,
}

impl AppState {
    pub fn new(catalog: FileSceneSource, static_mounts: Vec<StaticMount>) -> Arc<Self> {
        Arc::new(Self {
            catalog,
            static_mounts,
        })
    }
}

/// `GET /`
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::banner())
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// `GET /api/scenes`
///
/// Serves the catalog file with asset paths expanded. When the file is
/// missing or invalid the built-in catalog is served instead, so viewers
/// always get something to render.
pub async fn scenes(State(state): State<Arc<AppState>>) -> Json<SceneCatalog> {
    match state.catalog.fetch_scenes().await {
        Ok(catalog) => Json(catalog),
        Err(e) => {
            tracing::warn!("Serving built-in catalog: {}", e);
            Json(SceneCatalog::builtin_default())
        }
    }
}
