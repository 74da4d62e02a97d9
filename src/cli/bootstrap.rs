//! CLI bootstrap - settings, logging, catalog source and the first load.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::scene::{LoadOutcome, SelectionStore};
use crate::settings::{resolve_base_url, SettingsManager, SourceKind, ViewerSettings};
use crate::source::{FileSceneSource, HttpSceneSource, SceneDataSource};
use crate::state::ViewerState;

use super::args::Args;

/// Context for CLI execution containing all initialized services.
pub struct CliContext {
    /// Shared selection state
    pub state: Arc<ViewerState>,

    /// Settings manager
    pub settings_manager: Arc<SettingsManager>,

    /// Result of the initial load
    pub load_outcome: LoadOutcome,

    /// Command-line arguments
    pub args: Args,
}

/// Install the tracing subscriber.
///
/// Logs go to stderr so JSON output on stdout stays parseable.
pub fn init_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { "debug" } else { "warn" };
    let directive: tracing_subscriber::filter::Directive = format!("atmosphere_viewer_lib={}", log_level)
        .parse()
        .context("Invalid log directive")?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

/// Load `.env` and the settings file named by `args` (or the global one).
pub async fn load_settings(args: &Args) -> Result<Arc<SettingsManager>> {
    if let Err(e) = dotenvy::dotenv() {
        // Only warn on errors other than file not found
        if !matches!(e, dotenvy::Error::Io(_)) {
            tracing::warn!("Failed to load .env file: {}", e);
        }
    }

    let manager = match &args.config {
        Some(path) => SettingsManager::with_path(path.clone()).await,
        None => SettingsManager::new().await,
    }
    .context("Failed to initialize settings manager")?;

    // Only the global settings file gets a first-run template
    if args.config.is_none() {
        if let Err(e) = manager.ensure_settings_file().await {
            tracing::warn!("Failed to create settings template: {}", e);
        }
    }

    Ok(Arc::new(manager))
}

/// Pick the catalog source: command-line overrides first, then settings.
pub fn build_source(settings: &ViewerSettings, args: &Args) -> Result<Arc<dyn SceneDataSource>> {
    let prefixes = settings.assets.prefixes();

    if let Some(path) = &args.file {
        return Ok(Arc::new(FileSceneSource::new(path).with_prefixes(prefixes)));
    }

    let kind = if args.url.is_some() {
        SourceKind::Http
    } else {
        settings.source.kind
    };

    match kind {
        SourceKind::Http => {
            let base_url = args
                .url
                .clone()
                .unwrap_or_else(|| resolve_base_url(&settings.source));
            let timeout = settings.source.timeout_secs.map(Duration::from_secs);
            let source = HttpSceneSource::new(&base_url, &settings.source.endpoint, timeout)
                .with_context(|| format!("Invalid catalog source '{}'", base_url))?;
            Ok(Arc::new(source))
        }
        SourceKind::File => Ok(Arc::new(
            FileSceneSource::new(&settings.source.catalog_path).with_prefixes(prefixes),
        )),
    }
}

/// Initialize the CLI context and perform the first catalog load.
pub async fn initialize(args: &Args) -> Result<CliContext> {
    init_logging(args.verbose)?;

    let settings_manager = load_settings(args).await?;
    let settings = settings_manager.get().await;

    if args.verbose {
        eprintln!(
            "[cli] Settings loaded from {}",
            settings_manager.path().display()
        );
    }

    let source = build_source(&settings, args)?;

    let mut store = SelectionStore::new();
    if args.auto {
        store.toggle_auto_mode();
    }

    let state = Arc::new(ViewerState::new(store, source));
    if args.verbose {
        eprintln!("[cli] Catalog source: {}", state.source_description());
    }

    let load_outcome = state.reload().await;

    Ok(CliContext {
        state,
        settings_manager,
        load_outcome,
        args: args.clone(),
    })
}
