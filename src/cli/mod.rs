//! CLI module for headless scene browsing.
//!
//! The CLI drives a [`ViewerState`](crate::state::ViewerState) the same way a
//! rendering front end would: it loads the catalog once at startup, then
//! issues selection commands and prints the resulting selection.
//!
//! ```text
//! +-------------+     +-------------+     +---------------+
//! | runner.rs   | --> | ViewerState | --> | output.rs     |
//! | (commands)  |     | (selection) |     | (text/JSON)   |
//! +-------------+     +-------------+     +---------------+
//! ```
//!
//! # REPL Mode
//!
//! When no command is provided via `-e`, the CLI enters interactive REPL
//! mode. See `repl.rs` for details.

mod args;
mod bootstrap;
mod output;
mod repl;
mod runner;
#[cfg(feature = "server")]
pub mod server;

pub use args::Args;
pub use bootstrap::{build_source, init_logging, initialize, load_settings, CliContext};
pub use output::{format_scene_tree, format_selection, print_load_outcome};
pub use repl::run_repl;
pub use runner::{execute_batch, execute_command, Command};
