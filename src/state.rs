use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::scene::{LoadOutcome, Scene, SelectionStore, TimeVariant};
use crate::source::SceneDataSource;

/// Point-in-time copy of the selection, for renderers and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub scenes: Vec<Scene>,
    pub current_scene_id: Option<String>,
    pub current_weather_id: Option<String>,
    pub current_time_id: Option<String>,
    pub auto_mode: bool,
    pub current_time: Option<TimeVariant>,
}

impl SelectionSnapshot {
    fn capture(store: &SelectionStore) -> Self {
        Self {
            scenes: store.scenes().to_vec(),
            current_scene_id: store.current_scene_id().map(str::to_string),
            current_weather_id: store.current_weather_id().map(str::to_string),
            current_time_id: store.current_time_id().map(str::to_string),
            auto_mode: store.auto_mode(),
            current_time: store.current_time().cloned(),
        }
    }
}

/// The one selection store of a viewer session, shared with its consumers.
///
/// Writers are serialized by the lock. `reload` fetches without holding it,
/// so readers never wait on the network and never see a half-applied load.
pub struct ViewerState {
    store: RwLock<SelectionStore>,
    source: RwLock<Arc<dyn SceneDataSource>>,
}

impl ViewerState {
    pub fn new(store: SelectionStore, source: Arc<dyn SceneDataSource>) -> Self {
        Self {
            store: RwLock::new(store),
            source: RwLock::new(source),
        }
    }

    /// Fetch the catalog and re-derive the selection.
    pub async fn reload(&self) -> LoadOutcome {
        let source = self.source.read().clone();
        tracing::info!("Loading scene catalog from {}", source.describe());
        let result = source.fetch_scenes().await;
        self.store.write().apply_fetch_result(result)
    }

    /// Swap the catalog source. Takes effect on the next `reload`.
    pub fn replace_source(&self, source: Arc<dyn SceneDataSource>) {
        tracing::debug!("Catalog source is now {}", source.describe());
        *self.source.write() = source;
    }

    pub fn select_scene(&self, scene_id: &str) {
        self.store.write().select_scene(scene_id);
    }

    pub fn select_weather(&self, weather_id: &str) {
        self.store.write().select_weather(weather_id);
    }

    pub fn select_time(&self, time_id: &str) {
        self.store.write().select_time(time_id);
    }

    /// Returns the new auto-mode flag.
    pub fn toggle_auto_mode(&self) -> bool {
        let mut store = self.store.write();
        store.toggle_auto_mode();
        store.auto_mode()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::capture(&self.store.read())
    }

    /// Run `f` against the store under the read lock.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SelectionStore) -> R,
    {
        f(&self.store.read())
    }

    pub fn source_description(&self) -> String {
        self.source.read().describe()
    }
}
