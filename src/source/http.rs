//! HTTP catalog source.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::SceneDataSource;
use crate::error::SourceError;
use crate::scene::SceneCatalog;

/// Path of the catalog endpoint on the viewer backend
pub const DEFAULT_ENDPOINT: &str = "/api/scenes";

/// Fetches the catalog from the viewer backend.
#[derive(Debug, Clone)]
pub struct HttpSceneSource {
    /// HTTP client for making requests
    http_client: reqwest::Client,
    /// Fully resolved catalog URL
    url: Url,
}

impl HttpSceneSource {
    /// Create a source for `{base_url}{endpoint}`.
    ///
    /// # Arguments
    /// * `base_url` - Backend origin, e.g. "http://localhost:8000"
    /// * `endpoint` - Catalog path, usually [`DEFAULT_ENDPOINT`]
    /// * `timeout` - Optional per-request timeout
    pub fn new(
        base_url: &str,
        endpoint: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, SourceError> {
        let url = catalog_url(base_url, endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self { http_client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Append `endpoint` to the path of `base_url`, so a backend mounted under a
/// prefix (`http://host/viewer`) is asked for `/viewer/api/scenes`.
fn catalog_url(base_url: &str, endpoint: &str) -> Result<Url, SourceError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| SourceError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(SourceError::Config(format!(
            "base URL '{}' cannot carry a path",
            base_url
        )));
    }

    let path = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    url.set_path(&path);
    Ok(url)
}

#[async_trait]
impl SceneDataSource for HttpSceneSource {
    async fn fetch_scenes(&self) -> Result<SceneCatalog, SourceError> {
        tracing::debug!("Fetching scene catalog from {}", self.url);

        let response = self.http_client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let catalog = SceneCatalog::from_json(&body)?;

        tracing::debug!(
            "Fetched {} scene(s) from {}",
            catalog.scenes.len(),
            self.url
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
