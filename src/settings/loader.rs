//! Settings loading and environment variable interpolation.
//!
//! The `SettingsManager` handles:
//! - Loading settings from `~/.atmosphere-viewer/settings.toml`
//! - Resolving `$VAR` and `${VAR}` environment variable references
//! - First-run template generation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::RwLock;

use super::schema::{ServerSettings, SourceSettings, ViewerSettings};

/// Embedded template for first-run generation.
const TEMPLATE: &str = include_str!("template.toml");

/// Backend port used when neither settings nor environment name one
const DEFAULT_BACKEND_PORT: &str = "8000";

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Get the path to the global settings file.
pub fn settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".atmosphere-viewer")
        .join("settings.toml")
}

/// Manages settings loading and interpolation.
pub struct SettingsManager {
    /// Cached settings (with env vars resolved)
    settings: RwLock<ViewerSettings>,

    /// Path to the settings file
    path: PathBuf,
}

impl SettingsManager {
    /// Create a new SettingsManager, loading from the global path if available.
    pub async fn new() -> Result<Self> {
        Self::with_path(settings_path()).await
    }

    /// Create a SettingsManager for an explicit settings file.
    pub async fn with_path(path: PathBuf) -> Result<Self> {
        let settings = Self::load_from_path(&path).await?;

        Ok(Self {
            settings: RwLock::new(settings),
            path,
        })
    }

    /// Load settings from a specific path.
    async fn load_from_path(path: &Path) -> Result<ViewerSettings> {
        if !path.exists() {
            tracing::debug!("Settings file not found at {:?}, using defaults", path);
            return Ok(ViewerSettings::default());
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .context("Failed to read settings file")?;

        let mut settings: ViewerSettings =
            toml::from_str(&contents).context("Failed to deserialize settings")?;

        Self::resolve_env_vars(&mut settings);

        tracing::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Resolve $ENV_VAR references in string fields.
    fn resolve_env_vars(settings: &mut ViewerSettings) {
        fn resolve(value: &mut String) {
            if let Some(resolved) = resolve_env_ref(value) {
                *value = resolved;
            }
        }

        // An unresolvable reference means "not configured"
        if let Some(v) = settings.source.base_url.take() {
            settings.source.base_url = match resolve_env_ref(&v) {
                Some(resolved) => Some(resolved),
                None if v.trim().starts_with('$') => None,
                None => Some(v),
            };
        }
        resolve(&mut settings.source.catalog_path);
        resolve(&mut settings.assets.images_prefix);
        resolve(&mut settings.assets.audio_prefix);
        resolve(&mut settings.server.images_dir);
        resolve(&mut settings.server.audio_dir);
    }

    /// Get the current settings (read-only).
    pub async fn get(&self) -> ViewerSettings {
        self.settings.read().await.clone()
    }

    /// Check if settings file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Get the settings file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Ensure settings file exists, creating from template if needed.
    ///
    /// Returns `true` if a new file was created.
    pub async fn ensure_settings_file(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, TEMPLATE).await?;
        tracing::info!("Generated settings template at {:?}", self.path);
        Ok(true)
    }

    /// Reload settings from disk.
    pub async fn reload(&self) -> Result<()> {
        let settings = Self::load_from_path(&self.path).await?;
        *self.settings.write().await = settings;
        Ok(())
    }
}

/// Resolve a $ENV_VAR or ${ENV_VAR} reference.
///
/// Returns `Some(resolved)` if the value starts with `$` and the env var exists.
/// Returns `None` if no env var reference or env var not set.
fn resolve_env_ref(value: &str) -> Option<String> {
    let trimmed = value.trim();

    if let Some(rest) = trimmed.strip_prefix('$') {
        let var_name = rest
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .unwrap_or(rest);

        return std::env::var(var_name).ok();
    }

    None
}

/// Get a setting value with environment variable fallback.
///
/// Priority order:
/// 1. Settings value (if set and non-empty)
/// 2. Environment variable (first match from list)
/// 3. Default value
pub fn get_with_env_fallback(
    setting: &Option<String>,
    env_vars: &[&str],
    default: Option<String>,
) -> Option<String> {
    if let Some(v) = setting {
        if !v.is_empty() {
            return Some(v.clone());
        }
    }

    for env_var in env_vars {
        if let Ok(v) = std::env::var(env_var) {
            if !v.is_empty() {
                return Some(v);
            }
        }
    }

    default
}

/// Backend origin for the HTTP catalog source.
///
/// Priority: settings `source.base_url` > $ATMOSPHERE_API_URL >
/// `http://localhost:{$BACKEND_PORT | $VITE_BACKEND_PORT | 8000}`
pub fn resolve_base_url(source: &SourceSettings) -> String {
    if let Some(url) = get_with_env_fallback(&source.base_url, &["ATMOSPHERE_API_URL"], None) {
        return url;
    }

    let port = get_with_env_fallback(
        &None,
        &["BACKEND_PORT", "VITE_BACKEND_PORT"],
        Some(DEFAULT_BACKEND_PORT.to_string()),
    )
    .unwrap_or_else(|| DEFAULT_BACKEND_PORT.to_string());

    format!("http://localhost:{}", port)
}

/// Host and port for the catalog server.
///
/// Priority: settings > $BACKEND_HOST / $BACKEND_PORT > 0.0.0.0:8000
pub fn resolve_server_addr(server: &ServerSettings) -> Result<(String, u16)> {
    let host = get_with_env_fallback(
        &server.host,
        &["BACKEND_HOST"],
        Some(DEFAULT_SERVER_HOST.to_string()),
    )
    .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());

    let port = match server.port {
        Some(port) => port,
        None => get_with_env_fallback(&None, &["BACKEND_PORT"], None)
            .map(|p| {
                p.parse::<u16>()
                    .with_context(|| format!("Invalid BACKEND_PORT '{}'", p))
            })
            .transpose()?
            .unwrap_or(8000),
    };

    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_env_ref_dollar_format() {
        std::env::set_var("ATMOS_TEST_VAR_1", "test_value_1");

        assert_eq!(
            resolve_env_ref("$ATMOS_TEST_VAR_1"),
            Some("test_value_1".to_string())
        );

        std::env::remove_var("ATMOS_TEST_VAR_1");
    }

    #[test]
    fn test_resolve_env_ref_braces_format() {
        std::env::set_var("ATMOS_TEST_VAR_2", "test_value_2");

        assert_eq!(
            resolve_env_ref("${ATMOS_TEST_VAR_2}"),
            Some("test_value_2".to_string())
        );

        std::env::remove_var("ATMOS_TEST_VAR_2");
    }

    #[test]
    fn test_resolve_env_ref_no_match() {
        assert_eq!(resolve_env_ref("regular_value"), None);
        assert_eq!(resolve_env_ref("$NONEXISTENT_VAR_XYZ_12345"), None);
    }

    #[test]
    fn test_get_with_env_fallback_from_setting() {
        let setting = Some("from_settings".to_string());
        let result = get_with_env_fallback(&setting, &["SOME_VAR"], None);
        assert_eq!(result, Some("from_settings".to_string()));
    }

    #[test]
    fn test_get_with_env_fallback_from_env() {
        std::env::set_var("ATMOS_FALLBACK_TEST_VAR", "from_env");

        let result = get_with_env_fallback(&None, &["ATMOS_FALLBACK_TEST_VAR"], None);
        assert_eq!(result, Some("from_env".to_string()));

        std::env::remove_var("ATMOS_FALLBACK_TEST_VAR");
    }

    #[test]
    fn test_get_with_env_fallback_empty_setting_uses_default() {
        let setting = Some(String::new());
        let result = get_with_env_fallback(
            &setting,
            &["NONEXISTENT_VAR_ABC"],
            Some("default_value".to_string()),
        );
        assert_eq!(result, Some("default_value".to_string()));
    }

    #[test]
    fn test_resolve_base_url_prefers_setting() {
        let source = SourceSettings {
            base_url: Some("http://viewer.lan:9000".to_string()),
            ..SourceSettings::default()
        };
        assert_eq!(resolve_base_url(&source), "http://viewer.lan:9000");
    }

    #[test]
    fn test_resolve_server_addr_prefers_setting() {
        let server = ServerSettings {
            host: Some("127.0.0.1".to_string()),
            port: Some(9100),
            ..Default::default()
        };
        assert_eq!(
            resolve_server_addr(&server).unwrap(),
            ("127.0.0.1".to_string(), 9100)
        );
    }

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = SettingsManager::with_path(dir.path().join("settings.toml"))
            .await
            .unwrap();

        assert!(!manager.exists());
        assert_eq!(manager.get().await, ViewerSettings::default());
    }

    #[tokio::test]
    async fn test_loads_and_resolves_env_refs() {
        std::env::set_var("ATMOS_TEST_CATALOG", "/data/scenes.json");

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
                [source]
                kind = "file"
                catalog_path = "$ATMOS_TEST_CATALOG"
                base_url = "${ATMOS_TEST_UNSET_URL_98765}"
            "#,
        )
        .unwrap();

        let manager = SettingsManager::with_path(path).await.unwrap();
        let settings = manager.get().await;
        assert_eq!(settings.source.catalog_path, "/data/scenes.json");
        // Unset reference is dropped rather than used literally
        assert!(settings.source.base_url.is_none());

        std::env::remove_var("ATMOS_TEST_CATALOG");
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "version = \"one\"").unwrap();

        assert!(SettingsManager::with_path(path).await.is_err());
    }

    #[tokio::test]
    async fn test_ensure_settings_file_writes_template_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let manager = SettingsManager::with_path(path.clone()).await.unwrap();

        assert!(manager.ensure_settings_file().await.unwrap());
        assert!(manager.exists());
        assert!(!manager.ensure_settings_file().await.unwrap());

        // The template itself parses
        manager.reload().await.unwrap();
        assert_eq!(manager.get().await.version, 1);
    }
}
