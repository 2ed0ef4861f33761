mod state;
mod redirect;
mod child;
mod launch;
mod pipeline;
pub mod background;
pub mod foreground;

pub use state::{ShellState, ExecutionResult};

use tracing::debug;

use crate::builtins;
use crate::error::Result;
use crate::parser::{self, ParsedLine, Plan};

/// Execute one parsed line and report any failure as a single diagnostic.
///
/// Built-ins are matched on the first token and receive the whole argument
/// vector untouched. Everything else goes through the operator scan and is
/// launched as one command or a two-stage pipe.
pub fn execute(line: ParsedLine, state: &mut ShellState) -> ExecutionResult {
    if let Some(cmd) = builtins::registry::find_command(line.name()) {
        debug!(builtin = cmd.name, "dispatch");
        return (cmd.run)(&line.argv, state);
    }

    if let Err(e) = run_plan(line) {
        eprintln!("minish: {}", e);
    }
    ExecutionResult::KeepRunning
}

fn run_plan(line: ParsedLine) -> Result<()> {
    let background = line.background;
    match parser::build_plan(line.argv)? {
        Plan::Single { argv, redirect } => launch::run_single(&argv, redirect.as_ref(), background),
        Plan::Pipe { left, right } => pipeline::run(&left, &right, background),
    }
}
