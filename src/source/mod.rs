//! Scene catalog sources.
//!
//! The selection store only needs one thing from the outside world: a way to
//! fetch the scene hierarchy. `SceneDataSource` is that seam. Implementations:
//!
//! - [`HttpSceneSource`]: `GET {base_url}/api/scenes`
//! - [`FileSceneSource`]: a JSON catalog on disk, with asset path rewriting
//! - [`StaticSceneSource`]: an in-memory catalog (or a canned failure)

mod file;
mod http;

pub use file::{resolve_asset_paths, AssetPrefixes, FileSceneSource};
pub use http::{HttpSceneSource, DEFAULT_ENDPOINT};

use async_trait::async_trait;

use crate::error::SourceError;
use crate::scene::SceneCatalog;

/// Supplies the scene hierarchy.
///
/// Any failure (transport, status, decoding, validation) is reported as a
/// `SourceError`; callers are not expected to tell them apart.
#[async_trait]
pub trait SceneDataSource: Send + Sync {
    async fn fetch_scenes(&self) -> Result<SceneCatalog, SourceError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Serves a fixed catalog, or fails with a fixed message.
#[derive(Debug, Clone)]
pub struct StaticSceneSource {
    outcome: Result<SceneCatalog, String>,
}

impl StaticSceneSource {
    pub fn new(catalog: SceneCatalog) -> Self {
        Self {
            outcome: Ok(catalog),
        }
    }

    /// A source whose every fetch fails with `SourceError::Invalid(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

#[async_trait]
impl SceneDataSource for StaticSceneSource {
    async fn fetch_scenes(&self) -> Result<SceneCatalog, SourceError> {
        match &self.outcome {
            Ok(catalog) => {
                catalog.validate()?;
                Ok(catalog.clone())
            }
            Err(message) => Err(SourceError::Invalid(message.clone())),
        }
    }

    fn describe(&self) -> String {
        "static catalog".to_string()
    }
}
