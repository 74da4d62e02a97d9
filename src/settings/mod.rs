//! TOML-based settings for the atmosphere viewer.
//!
//! Settings are loaded from `~/.atmosphere-viewer/settings.toml` (or a path
//! given on the command line) with environment variable interpolation.
//! Values left unset fall back to the environment variables the viewer
//! backend already uses (`BACKEND_HOST`, `BACKEND_PORT`, ...).
//!
//! # Usage
//!
//! ```rust,ignore
//! use atmosphere_viewer_lib::settings::{resolve_base_url, SettingsManager};
//!
//! let manager = SettingsManager::new().await?;
//! let settings = manager.get().await;
//! let base_url = resolve_base_url(&settings.source);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    get_with_env_fallback, resolve_base_url, resolve_server_addr, settings_path, SettingsManager,
};
pub use schema::{AssetSettings, ServerSettings, SourceKind, SourceSettings, ViewerSettings};
