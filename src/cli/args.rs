//! CLI argument parsing using clap.
//!
//! Defines the command-line interface for atmosphere-cli.

use clap::Parser;
use std::path::PathBuf;

/// Atmosphere viewer CLI - browse scenes, weathers and times of day headlessly
#[derive(Parser, Debug, Clone)]
#[command(name = "atmosphere-cli")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Settings file (default: ~/.atmosphere-viewer/settings.toml)
    #[arg(short = 'c', long, env = "ATMOSPHERE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fetch the catalog from this backend (overrides settings)
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Read the catalog from a JSON file (overrides settings)
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Run a command and exit; may be repeated, e.g. `-e "scene forest" -e show`
    #[arg(short = 'e', long)]
    pub execute: Vec<String>,

    /// Enable auto mode before the first load
    #[arg(long)]
    pub auto: bool,

    /// Output as JSON lines (for scripting/parsing)
    #[arg(long)]
    pub json: bool,

    /// Only print command results (no load report)
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Show verbose output (debug information)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Serve the catalog over HTTP instead of browsing it
    #[cfg(feature = "server")]
    #[arg(long)]
    pub serve: bool,

    /// Host to bind in server mode (overrides settings and $BACKEND_HOST)
    #[cfg(feature = "server")]
    #[arg(long, requires = "serve")]
    pub host: Option<String>,

    /// Port to bind in server mode (overrides settings and $BACKEND_PORT)
    #[cfg(feature = "server")]
    #[arg(long, requires = "serve")]
    pub port: Option<u16>,
}
