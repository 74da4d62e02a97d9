//! Scene hierarchy types: Scene → Weather → TimeVariant.
//!
//! These mirror the catalog payload served at `/api/scenes`. Everything here is
//! immutable once loaded; the selection store replaces the whole hierarchy
//! rather than editing it.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Wire payload: `{ "scenes": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneCatalog {
    pub scenes: Vec<Scene>,
}

/// Top-level visual environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub name: String,
    pub weathers: Vec<Weather>,
}

/// Weather variant of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub id: String,
    pub name: String,
    pub times: Vec<TimeVariant>,
}

/// A time-of-day rendering of a scene + weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeVariant {
    /// Usually "day", "dusk" or "night", but any id is accepted
    pub id: String,
    pub name: String,
    pub image: String,
    pub atmosphere: Atmosphere,
    /// Ambient audio track, if the catalog provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// Named rendering parameters (brightness, contrast, saturation, ...).
///
/// Opaque to the store: keys are kept as-is, including ones this crate
/// knows nothing about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Atmosphere(BTreeMap<String, f64>);

impl Atmosphere {
    pub const BRIGHTNESS: &'static str = "brightness";
    pub const CONTRAST: &'static str = "contrast";
    pub const SATURATION: &'static str = "saturation";

    /// Neutral parameters: brightness, contrast and saturation at 1.0.
    pub fn neutral() -> Self {
        [Self::BRIGHTNESS, Self::CONTRAST, Self::SATURATION]
            .into_iter()
            .map(|key| (key.to_string(), 1.0))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn brightness(&self) -> Option<f64> {
        self.get(Self::BRIGHTNESS)
    }

    pub fn contrast(&self) -> Option<f64> {
        self.get(Self::CONTRAST)
    }

    pub fn saturation(&self) -> Option<f64> {
        self.get(Self::SATURATION)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Atmosphere {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Scene {
    pub fn weather(&self, weather_id: &str) -> Option<&Weather> {
        self.weathers.iter().find(|w| w.id == weather_id)
    }

    pub fn first_weather(&self) -> Option<&Weather> {
        self.weathers.first()
    }
}

impl Weather {
    pub fn time(&self, time_id: &str) -> Option<&TimeVariant> {
        self.times.iter().find(|t| t.id == time_id)
    }

    pub fn first_time(&self) -> Option<&TimeVariant> {
        self.times.first()
    }
}

impl SceneCatalog {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    /// The catalog installed when no source can be reached.
    pub fn builtin_default() -> Self {
        Self {
            scenes: vec![Scene {
                id: "scene1".to_string(),
                name: "场景 1".to_string(),
                weathers: vec![Weather {
                    id: "sunny".to_string(),
                    name: "晴天".to_string(),
                    times: vec![TimeVariant {
                        id: "day".to_string(),
                        name: "白天".to_string(),
                        image: "day.png".to_string(),
                        atmosphere: Atmosphere::neutral(),
                        audio: None,
                    }],
                }],
            }],
        }
    }

    /// Decode and validate a JSON payload.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SourceError> {
        let catalog: SceneCatalog = serde_json::from_slice(bytes)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check id uniqueness at every level of the hierarchy.
    ///
    /// An empty catalog, or a scene without weathers, is accepted: the store
    /// handles those by leaving the selection empty.
    pub fn validate(&self) -> Result<(), SourceError> {
        let mut scene_ids = HashSet::new();
        for scene in &self.scenes {
            if !scene_ids.insert(scene.id.as_str()) {
                return Err(SourceError::Invalid(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }

            let mut weather_ids = HashSet::new();
            for weather in &scene.weathers {
                if !weather_ids.insert(weather.id.as_str()) {
                    return Err(SourceError::Invalid(format!(
                        "duplicate weather id '{}' in scene '{}'",
                        weather.id, scene.id
                    )));
                }

                let mut time_ids = HashSet::new();
                for time in &weather.times {
                    if !time_ids.insert(time.id.as_str()) {
                        return Err(SourceError::Invalid(format!(
                            "duplicate time id '{}' in weather '{}' of scene '{}'",
                            time.id, weather.id, scene.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == scene_id)
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
