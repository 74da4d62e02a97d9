//! Lightweight REPL (Read-Eval-Print-Loop) for atmosphere-cli.
//!
//! Entered when no `-e` command is given. Each line is parsed as a
//! [`Command`]; `quit` or EOF (Ctrl+D) leaves the loop.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use super::bootstrap::CliContext;
use super::output::print_selection;
use super::runner::{execute_command, Command};

/// Run an interactive REPL session.
pub async fn run_repl(ctx: &mut CliContext) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    eprintln!("atmosphere-cli interactive mode");
    eprintln!("Type 'help' for commands, 'quit' to exit\n");

    print_selection(&ctx.state.snapshot(), ctx.args.json)?;

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // EOF (Ctrl+D)
            eprintln!("\nGoodbye!");
            break;
        }

        match Command::parse(&input) {
            Command::Empty => continue,
            Command::Quit => {
                eprintln!("Goodbye!");
                break;
            }
            command => {
                if let Err(e) = execute_command(ctx, &command).await {
                    eprintln!("Error: {}", e);
                }
            }
        }
    }

    Ok(())
}
