//! Scene hierarchy and the cascading selection store.
//!
//! A viewer picks a Scene, then one of its Weathers, then one of that
//! weather's TimeVariants. `SelectionStore` owns the loaded hierarchy plus the
//! three selected ids and keeps them consistent as the user navigates:
//!
//! ```text
//! Scene ──> Weather ──> TimeVariant
//!   │          │            │
//!   │          │            └─ image, atmosphere, audio
//!   │          └─ kept across scene switches when the new scene has it
//!   └─ first scene selected on load
//! ```

mod model;
mod store;
mod time_of_day;

pub use model::{Atmosphere, Scene, SceneCatalog, TimeVariant, Weather};
pub use store::{LoadOutcome, SelectionStore};
pub use time_of_day::{classify_time_of_day, Clock, FixedClock, LocalClock, TimeOfDay};
