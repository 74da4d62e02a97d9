//! Selection core of the atmosphere viewer.
//!
//! A viewer shows one Scene, in one of its Weathers, at one of that weather's
//! times of day. This crate owns that three-level selection:
//!
//! - [`scene`]: the hierarchy types and the cascading [`SelectionStore`]
//! - [`source`]: where the hierarchy comes from (HTTP backend, JSON file, memory)
//! - [`state`]: the shared per-session handle consumers hold
//! - [`settings`]: TOML configuration with environment fallbacks
//! - `cli` (feature `cli`): headless front end, plus the catalog server with
//!   feature `server`

#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod scene;
pub mod settings;
pub mod source;
pub mod state;

pub use error::SourceError;
pub use scene::{
    classify_time_of_day, Atmosphere, LoadOutcome, Scene, SceneCatalog, SelectionStore,
    TimeOfDay, TimeVariant, Weather,
};
pub use source::SceneDataSource;
pub use state::{SelectionSnapshot, ViewerState};
