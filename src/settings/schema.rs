//! Settings schema definitions for the atmosphere viewer.
//!
//! All settings structs use `#[serde(default)]` to allow partial configuration files.
//! Missing fields are filled with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::source::{AssetPrefixes, DEFAULT_ENDPOINT};

/// Root settings structure.
///
/// Loaded from `~/.atmosphere-viewer/settings.toml` with environment variable
/// interpolation support. Version field enables future migrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Schema version for migrations
    pub version: u32,

    /// Where the scene catalog comes from
    pub source: SourceSettings,

    /// Asset URL prefixes applied to file catalogs
    pub assets: AssetSettings,

    /// Catalog server bind address
    pub server: ServerSettings,
}

/// Kind of catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Fetch `{base_url}{endpoint}` over HTTP
    Http,
    /// Read `catalog_path` from disk
    File,
}

/// Catalog source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// "http" | "file"
    pub kind: SourceKind,

    /// Backend origin, e.g. "http://192.168.1.20:8000" (supports $ENV_VAR syntax)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Catalog endpoint path on the backend
    pub endpoint: String,

    /// Request timeout in seconds (none = wait indefinitely)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Catalog JSON file, used by the file source and the catalog server
    pub catalog_path: String,
}

/// URL prefixes for image and audio assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    pub images_prefix: String,
    pub audio_prefix: String,
}

/// Catalog server bind address and static asset directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen host (falls back to $BACKEND_HOST, then 0.0.0.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Listen port (falls back to $BACKEND_PORT, then 8000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Directory served under `assets.images_prefix`
    pub images_dir: String,

    /// Directory served under `assets.audio_prefix`
    pub audio_dir: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            version: 1,
            source: SourceSettings::default(),
            assets: AssetSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            base_url: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: Some(10),
            catalog_path: "config/scenes.json".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            images_dir: "static/images".to_string(),
            audio_dir: "static/audio".to_string(),
        }
    }
}

impl Default for AssetSettings {
    fn default() -> Self {
        let prefixes = AssetPrefixes::default();
        Self {
            images_prefix: prefixes.images,
            audio_prefix: prefixes.audio,
        }
    }
}

impl AssetSettings {
    pub fn prefixes(&self) -> AssetPrefixes {
        AssetPrefixes {
            images: self.images_prefix.clone(),
            audio: self.audio_prefix.clone(),
        }
    }
}
