use super::command::Command;
use super::handlers::AppState;
use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, IsTerminal};
use tracing::error;

enum Outcome {
    Continue,
    Exit,
}

/// Run the session loop until EXIT, end of input, or an interrupt.
///
/// Values requested with GET go to stdout; prompts, acknowledgments and
/// diagnostics go to stderr and only appear in interactive sessions.
pub fn run(state: &mut AppState) -> Result<()> {
    if std::io::stdin().is_terminal() {
        run_interactive(state)
    } else {
        run_piped(state)
    }
}

fn run_interactive(state: &mut AppState) -> Result<()> {
    eprintln!("{}", "--- minikv ---".bold().cyan());
    eprintln!("Commands: SET <key> <value>, GET <key>, EXIT");
    if !state.is_durable() {
        eprintln!("{}", "Running ephemeral: writes will not survive restart".yellow());
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let prompt = format!("{}> ", "minikv".green());
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(&line)?;

                match dispatch(state, &line, true) {
                    Outcome::Continue => {}
                    Outcome::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                eprintln!("Exiting...");
                break;
            }
            Err(err) => {
                error!("Readline error: {err}");
                break;
            }
        }
    }

    Ok(())
}

fn run_piped(state: &mut AppState) -> Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                // Treat an unreadable input stream as end of input
                error!("Error reading input: {e}");
                break;
            }
        };

        match dispatch(state, &line, false) {
            Outcome::Continue => {}
            Outcome::Exit => break,
        }
    }

    Ok(())
}

fn dispatch(state: &mut AppState, line: &str, interactive: bool) -> Outcome {
    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Outcome::Continue,
        Err(e) => {
            if interactive {
                eprintln!("{}", e.to_string().red());
            }
            return Outcome::Continue;
        }
    };

    match command {
        Command::Set { key, value } => match state.set(&key, &value) {
            Ok(()) => {
                if interactive {
                    eprintln!("{}", "(OK)".green());
                }
            }
            // Not fatal: the cache was left untouched and the session goes on
            Err(e) => error!("Error writing to data file: {e}"),
        },
        Command::Get { key } => {
            println!("{}", state.get(&key).unwrap_or_default());
        }
        Command::Exit => return Outcome::Exit,
    }

    Outcome::Continue
}
