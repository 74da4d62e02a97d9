//! CLI command parsing and execution.
//!
//! The same commands are accepted from `-e` and from the REPL, with or
//! without a leading `/`.

use anyhow::Result;

use super::bootstrap::{build_source, CliContext};
use super::output::{print_load_outcome, print_scenes, print_selection};

pub const HELP: &str = "\
Commands:
  scenes           list the scene hierarchy
  show             show the current selection
  scene <id>       select a scene
  weather <id>     select a weather in the current scene
  time <id>        select a time variant
  auto             toggle auto mode
  reload           re-read settings and fetch the catalog again
  help             show this help
  quit             exit the REPL";

/// A parsed CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Scenes,
    Show,
    Scene(String),
    Weather(String),
    Time(String),
    ToggleAuto,
    Reload,
    Help,
    Quit,
    /// Empty input (skip)
    Empty,
    /// Unknown command or missing argument
    Unknown(String),
}

impl Command {
    /// Parse one line of user input.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let line = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next().map(str::to_string);
        let extra = parts.next().is_some();

        match (name.as_str(), arg, extra) {
            ("scenes" | "list" | "ls", None, false) => Command::Scenes,
            ("show" | "current", None, false) => Command::Show,
            ("scene", Some(id), false) => Command::Scene(id),
            ("weather", Some(id), false) => Command::Weather(id),
            ("time", Some(id), false) => Command::Time(id),
            ("auto", None, false) => Command::ToggleAuto,
            ("reload", None, false) => Command::Reload,
            ("help" | "?", None, false) => Command::Help,
            ("quit" | "exit" | "q", None, false) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// Execute one command against the context and print its result.
///
/// Selection commands print the resulting selection. `Quit` and `Empty` do
/// nothing here; the REPL handles them.
pub async fn execute_command(ctx: &mut CliContext, command: &Command) -> Result<()> {
    let json_mode = ctx.args.json;
    let state = &ctx.state;

    match command {
        Command::Scenes => print_scenes(&state.snapshot(), json_mode)?,
        Command::Show => print_selection(&state.snapshot(), json_mode)?,
        Command::Scene(id) => {
            state.select_scene(id);
            print_selection(&state.snapshot(), json_mode)?;
        }
        Command::Weather(id) => {
            state.select_weather(id);
            print_selection(&state.snapshot(), json_mode)?;
        }
        Command::Time(id) => {
            state.select_time(id);
            print_selection(&state.snapshot(), json_mode)?;
        }
        Command::ToggleAuto => {
            state.toggle_auto_mode();
            print_selection(&state.snapshot(), json_mode)?;
        }
        Command::Reload => {
            match ctx.settings_manager.reload().await {
                Ok(()) => {
                    let settings = ctx.settings_manager.get().await;
                    match build_source(&settings, &ctx.args) {
                        Ok(source) => state.replace_source(source),
                        Err(e) => tracing::warn!("Keeping current catalog source: {:#}", e),
                    }
                }
                Err(e) => tracing::warn!("Keeping previous settings: {:#}", e),
            }

            let outcome = state.reload().await;
            print_load_outcome(&outcome, json_mode)?;
            ctx.load_outcome = outcome;
            print_selection(&ctx.state.snapshot(), json_mode)?;
        }
        Command::Help => eprintln!("{}", HELP),
        Command::Unknown(input) => {
            anyhow::bail!("Unknown command: {} (type 'help' for commands)", input)
        }
        Command::Quit | Command::Empty => {}
    }

    Ok(())
}

/// Execute each `-e` command in order, stopping at the first error.
pub async fn execute_batch(ctx: &mut CliContext, commands: &[String]) -> Result<()> {
    for line in commands {
        let command = Command::parse(line);
        if command == Command::Quit {
            break;
        }
        execute_command(ctx, &command).await?;
    }
    Ok(())
}
