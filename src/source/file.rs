//! JSON catalog file source.
//!
//! Catalog files reference assets relative to their scene and weather
//! (`"image": "day.png"`). When loaded, those references are expanded to
//! the paths the backend serves them under:
//!
//! ```text
//! image: day.png    ->  /images/{scene_id}/{weather_id}/day.png
//! audio: rain.mp3   ->  /audio/{scene_id}/{weather_id}/rain.mp3
//! ```
//!
//! References that already start with `/` are left alone.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::SceneDataSource;
use crate::error::SourceError;
use crate::scene::SceneCatalog;

/// URL prefixes under which image and audio assets are served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPrefixes {
    pub images: String,
    pub audio: String,
}

impl Default for AssetPrefixes {
    fn default() -> Self {
        Self {
            images: "/images".to_string(),
            audio: "/audio".to_string(),
        }
    }
}

/// Expand relative image/audio references in place.
pub fn resolve_asset_paths(catalog: &mut SceneCatalog, prefixes: &AssetPrefixes) {
    fn expand(reference: &mut String, prefix: &str, scene_id: &str, weather_id: &str) {
        if reference.is_empty() || reference.starts_with('/') {
            return;
        }
        *reference = format!(
            "{}/{}/{}/{}",
            prefix.trim_end_matches('/'),
            scene_id,
            weather_id,
            reference
        );
    }

    for scene in &mut catalog.scenes {
        for weather in &mut scene.weathers {
            for time in &mut weather.times {
                expand(&mut time.image, &prefixes.images, &scene.id, &weather.id);
                if let Some(audio) = time.audio.as_mut() {
                    expand(audio, &prefixes.audio, &scene.id, &weather.id);
                }
            }
        }
    }
}

/// Reads the catalog from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSceneSource {
    path: PathBuf,
    prefixes: AssetPrefixes,
}

impl FileSceneSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prefixes: AssetPrefixes::default(),
        }
    }

    pub fn with_prefixes(mut self, prefixes: AssetPrefixes) -> Self {
        self.prefixes = prefixes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SceneDataSource for FileSceneSource {
    async fn fetch_scenes(&self) -> Result<SceneCatalog, SourceError> {
        let contents = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let mut catalog = SceneCatalog::from_json(&contents)?;
        resolve_asset_paths(&mut catalog, &self.prefixes);

        tracing::debug!(
            "Read {} scene(s) from {:?}",
            catalog.scenes.len(),
            self.path
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"{
        "scenes": [{
            "id": "harbor",
            "name": "Harbor",
            "weathers": [{
                "id": "rain",
                "name": "Rain",
                "times": [
                    {
                        "id": "night",
                        "name": "Night",
                        "image": "night.png",
                        "audio": "rain.mp3",
                        "atmosphere": { "brightness": 0.4 }
                    },
                    {
                        "id": "day",
                        "name": "Day",
                        "image": "/cdn/harbor-day.png",
                        "atmosphere": { "brightness": 0.9 }
                    },
                    {
                        "id": "dusk",
                        "name": "Dusk",
                        "image": "",
                        "audio": "",
                        "atmosphere": {}
                    }
                ]
            }]
        }]
    }"#;

    fn write_catalog(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("scenes.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_and_rewrites_asset_paths() {
        let dir = TempDir::new().unwrap();
        let source = FileSceneSource::new(write_catalog(&dir, CATALOG));

        let catalog = source.fetch_scenes().await.unwrap();
        let times = &catalog.scenes[0].weathers[0].times;

        assert_eq!(times[0].image, "/images/harbor/rain/night.png");
        assert_eq!(times[0].audio.as_deref(), Some("/audio/harbor/rain/rain.mp3"));
        // Absolute references are untouched
        assert_eq!(times[1].image, "/cdn/harbor-day.png");
        assert!(times[1].audio.is_none());
        // Empty references stay empty
        assert_eq!(times[2].image, "");
        assert_eq!(times[2].audio.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn custom_prefixes() {
        let dir = TempDir::new().unwrap();
        let source = FileSceneSource::new(write_catalog(&dir, CATALOG)).with_prefixes(
            AssetPrefixes {
                images: "/static/img/".to_string(),
                audio: "/static/snd".to_string(),
            },
        );

        let catalog = source.fetch_scenes().await.unwrap();
        let time = &catalog.scenes[0].weathers[0].times[0];
        assert_eq!(time.image, "/static/img/harbor/rain/night.png");
        assert_eq!(time.audio.as_deref(), Some("/static/snd/harbor/rain/rain.mp3"));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let source = FileSceneSource::new(dir.path().join("absent.json"));
        assert!(matches!(
            source.fetch_scenes().await,
            Err(SourceError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let source = FileSceneSource::new(write_catalog(&dir, "{ \"scenes\": [ }"));
        assert!(matches!(
            source.fetch_scenes().await,
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn rewriting_is_idempotent() {
        let mut catalog = SceneCatalog::builtin_default();
        let prefixes = AssetPrefixes::default();
        resolve_asset_paths(&mut catalog, &prefixes);
        resolve_asset_paths(&mut catalog, &prefixes);
        assert_eq!(
            catalog.scenes[0].weathers[0].times[0].image,
            "/images/scene1/sunny/day.png"
        );
    }
}
