//! The cascading selection store.
//!
//! Holds the loaded hierarchy and the current `(scene, weather, time)` ids.
//! Every operation leaves the selection consistent:
//!
//! - a selected weather belongs to the selected scene
//! - a selected time belongs to the selected weather
//! - all three ids are empty only when the hierarchy has nothing to select
//!
//! `select_time` is the exception: it trusts its caller and performs no
//! validation at all.

use std::sync::Arc;

use serde::Serialize;

use super::model::{Scene, SceneCatalog, TimeVariant, Weather};
use super::time_of_day::{Clock, LocalClock};
use crate::error::SourceError;
use crate::source::SceneDataSource;

/// How the last load populated the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The source answered with a valid catalog
    Fetched { scene_count: usize },
    /// The source failed; the built-in catalog was installed instead
    Fallback { reason: String },
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }
}

/// Scene hierarchy plus the current selection.
pub struct SelectionStore {
    scenes: Vec<Scene>,
    current_scene_id: Option<String>,
    current_weather_id: Option<String>,
    current_time_id: Option<String>,
    auto_mode: bool,
    clock: Arc<dyn Clock>,
}

impl SelectionStore {
    /// Empty store reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(LocalClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            scenes: Vec::new(),
            current_scene_id: None,
            current_weather_id: None,
            current_time_id: None,
            auto_mode: false,
            clock,
        }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn current_scene_id(&self) -> Option<&str> {
        self.current_scene_id.as_deref()
    }

    pub fn current_weather_id(&self) -> Option<&str> {
        self.current_weather_id.as_deref()
    }

    pub fn current_time_id(&self) -> Option<&str> {
        self.current_time_id.as_deref()
    }

    pub fn auto_mode(&self) -> bool {
        self.auto_mode
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        let scene_id = self.current_scene_id.as_deref()?;
        self.find_scene(scene_id)
    }

    pub fn current_weather(&self) -> Option<&Weather> {
        let weather_id = self.current_weather_id.as_deref()?;
        self.current_scene()?.weather(weather_id)
    }

    /// The selected time variant, if all three ids resolve.
    pub fn current_time(&self) -> Option<&TimeVariant> {
        let time_id = self.current_time_id.as_deref()?;
        self.current_weather()?.time(time_id)
    }

    /// Fetch the hierarchy from `source` and select its first entries.
    ///
    /// Never fails: any source error is logged and the built-in catalog is
    /// installed instead.
    pub async fn load(&mut self, source: &dyn SceneDataSource) -> LoadOutcome {
        tracing::info!("Loading scene catalog from {}", source.describe());
        let result = source.fetch_scenes().await;
        self.apply_fetch_result(result)
    }

    /// Install the result of a fetch: the catalog on success, the built-in
    /// default on failure.
    pub fn apply_fetch_result(
        &mut self,
        result: Result<SceneCatalog, SourceError>,
    ) -> LoadOutcome {
        match result {
            Ok(catalog) => {
                let scene_count = catalog.scenes.len();
                tracing::info!("Loaded {} scene(s)", scene_count);
                self.replace_scenes(catalog.scenes);
                tracing::debug!("Current time variant: {:?}", self.current_time());
                LoadOutcome::Fetched { scene_count }
            }
            Err(e) => {
                tracing::error!("Failed to load scene catalog: {}", e);
                tracing::warn!("Falling back to built-in scene catalog");
                self.replace_scenes(SceneCatalog::builtin_default().scenes);
                LoadOutcome::Fallback {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Swap in a new hierarchy and re-derive the selection from scratch.
    fn replace_scenes(&mut self, scenes: Vec<Scene>) {
        self.scenes = scenes;
        self.current_scene_id = None;
        self.current_weather_id = None;
        self.current_time_id = None;

        let Some(scene) = self.scenes.first() else {
            return;
        };
        let Some(weather) = scene.first_weather() else {
            tracing::warn!("First scene '{}' has no weathers, nothing selected", scene.id);
            return;
        };

        let time_id = if self.auto_mode {
            let time_of_day = self.clock.time_of_day();
            weather
                .time(time_of_day.as_str())
                .or_else(|| weather.first_time())
                .map(|t| t.id.clone())
        } else {
            weather.first_time().map(|t| t.id.clone())
        };

        self.current_scene_id = Some(scene.id.clone());
        self.current_weather_id = Some(weather.id.clone());
        self.current_time_id = time_id;
    }

    /// Switch scene, keeping the current weather and time when the new scene
    /// has them and falling back to its first weather/time otherwise.
    ///
    /// Unknown ids are stored as-is; callers pass ids from `scenes()`.
    pub fn select_scene(&mut self, scene_id: &str) {
        tracing::debug!("Selecting scene '{}'", scene_id);
        self.current_scene_id = Some(scene_id.to_string());

        let Some(scene) = self.find_scene(scene_id) else {
            return;
        };

        let (weather_id, time_id) = match scene.first_weather() {
            // Nothing to select below this scene
            None => (None, None),
            Some(first_weather) => {
                let kept_weather = self
                    .current_weather_id
                    .as_deref()
                    .and_then(|id| scene.weather(id));

                let keeps_selection = kept_weather.is_some_and(|weather| {
                    self.current_time_id
                        .as_deref()
                        .is_some_and(|id| weather.time(id).is_some())
                });
                if keeps_selection {
                    return;
                }

                // Auto mode is not consulted here, only on load
                (
                    Some(first_weather.id.clone()),
                    first_weather.first_time().map(|t| t.id.clone()),
                )
            }
        };

        self.current_weather_id = weather_id;
        self.current_time_id = time_id;
    }

    /// Switch weather within the current scene, keeping the current time
    /// when the new weather has it.
    pub fn select_weather(&mut self, weather_id: &str) {
        tracing::debug!("Selecting weather '{}'", weather_id);
        self.current_weather_id = Some(weather_id.to_string());

        let Some(weather) = self.current_scene().and_then(|s| s.weather(weather_id)) else {
            return;
        };

        let keep = self
            .current_time_id
            .as_deref()
            .is_some_and(|id| weather.time(id).is_some());
        if keep {
            return;
        }
        let time_id = weather.first_time().map(|t| t.id.clone());
        self.current_time_id = time_id;
    }

    /// Set the time id. No validation.
    pub fn select_time(&mut self, time_id: &str) {
        tracing::debug!("Selecting time '{}'", time_id);
        self.current_time_id = Some(time_id.to_string());
    }

    /// Flip auto mode. Turning it on selects the current weather's time
    /// variant matching the wall clock, if there is one.
    pub fn toggle_auto_mode(&mut self) {
        self.auto_mode = !self.auto_mode;
        tracing::debug!("Auto mode {}", if self.auto_mode { "on" } else { "off" });

        if !self.auto_mode {
            return;
        }

        let time_of_day = self.clock.time_of_day();
        let matched = self
            .current_weather()
            .and_then(|w| w.time(time_of_day.as_str()))
            .map(|t| t.id.clone());

        match matched {
            Some(time_id) => self.current_time_id = Some(time_id),
            None => tracing::debug!(
                "No '{}' variant in current weather, keeping selection",
                time_of_day
            ),
        }
    }

    fn find_scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == scene_id)
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("scenes", &self.scenes.len())
            .field("current_scene_id", &self.current_scene_id)
            .field("current_weather_id", &self.current_weather_id)
            .field("current_time_id", &self.current_time_id)
            .field("auto_mode", &self.auto_mode)
            .finish()
    }
}
