//! atmosphere-cli - headless interface to the atmosphere viewer's selection core
//!
//! # Usage
//!
//! ```bash
//! # Show the initial selection from the configured backend
//! atmosphere-cli -e show
//!
//! # Browse a local catalog file
//! atmosphere-cli --file config/scenes.json -e "scene forest" -e "weather rain"
//!
//! # JSON output for scripting
//! atmosphere-cli --url http://localhost:8000 --json -e auto | jq .
//!
//! # Interactive REPL mode (when no -e is provided)
//! atmosphere-cli
//!
//! # Serve a catalog file at /api/scenes (requires the `server` feature)
//! atmosphere-cli --serve --file config/scenes.json --port 8000
//! ```

use anyhow::Result;
use clap::Parser;

use atmosphere_viewer_lib::cli::{execute_batch, initialize, print_load_outcome, run_repl, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    #[cfg(feature = "server")]
    if args.serve {
        return serve(&args).await;
    }

    let mut ctx = initialize(&args).await?;

    if !args.quiet {
        print_load_outcome(&ctx.load_outcome, args.json)?;
    }

    if args.execute.is_empty() {
        run_repl(&mut ctx).await
    } else {
        execute_batch(&mut ctx, &args.execute).await
    }
}

/// Serve the catalog until Ctrl+C.
#[cfg(feature = "server")]
async fn serve(args: &Args) -> Result<()> {
    use atmosphere_viewer_lib::cli::{init_logging, load_settings, server};
    use atmosphere_viewer_lib::settings::resolve_server_addr;
    use atmosphere_viewer_lib::source::FileSceneSource;

    init_logging(args.verbose)?;
    let settings = load_settings(args).await?.get().await;

    let (host, port) = resolve_server_addr(&settings.server)?;
    let host = args.host.clone().unwrap_or(host);
    let port = args.port.unwrap_or(port);

    let catalog_path = args
        .file
        .clone()
        .unwrap_or_else(|| settings.source.catalog_path.clone().into());
    let catalog = FileSceneSource::new(catalog_path).with_prefixes(settings.assets.prefixes());
    let state = server::AppState::new(catalog, server::StaticMount::from_settings(&settings));

    let (addr, shutdown) = server::start_server(&host, port, state).await?;
    eprintln!("Serving scene catalog on http://{}/api/scenes", addr);

    tokio::signal::ctrl_c().await?;
    shutdown.cancel();
    Ok(())
}
