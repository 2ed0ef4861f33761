#[cfg(not(unix))]
compile_error!("minish drives fork/exec and SIGALRM and only builds on Unix");

mod config;
mod error;
mod parser;
mod engine;
mod builtins;
mod signals;

use std::env;
use std::io;
use std::io::IsTerminal;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use engine::{ExecutionResult, ShellState};

fn get_prompt() -> String {
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            warn!(error = %e, "current directory is unavailable");
            std::path::PathBuf::from("?")
        }
    };

    let path_str = match dirs::home_dir() {
        Some(home) => match cwd.strip_prefix(&home) {
            Ok(relative) if relative.as_os_str().is_empty() => "~".to_string(),
            Ok(relative) => format!("~/{}", relative.display()),
            Err(_) => cwd.display().to_string(),
        },
        None => cwd.display().to_string(),
    };

    format!("{}> ", path_str)
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> rustyline::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    if let Err(e) = signals::init() {
        eprintln!("minish: cannot install signal handlers: {}", e);
        std::process::exit(1);
    }

    let mut rl = DefaultEditor::new()?;
    let mut state = ShellState::new(config.limits);

    loop {
        engine::background::reap();

        let prompt = get_prompt();
        signals::publish_prompt(&prompt);

        match rl.readline(&prompt) {
            Ok(line) => {
                let parsed = match parser::parse_line(&line, &state.limits) {
                    Ok(Some(parsed)) => parsed,
                    Ok(None) => continue,
                    Err(e) => {
                        eprintln!("minish: {}", e);
                        continue;
                    }
                };
                let _ = rl.add_history_entry(line.trim());

                debug!(argv = ?parsed.argv, background = parsed.background, "line");
                if engine::execute(parsed, &mut state) == ExecutionResult::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            // read_line already consumed the offending line
            Err(ReadlineError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                eprintln!("minish: {}", e);
                continue;
            }
            Err(err) => {
                eprintln!("minish: {}", err);
                break;
            }
        }
    }
    Ok(())
}
