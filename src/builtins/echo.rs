use std::env;

use crate::engine::{ExecutionResult, ShellState};
use crate::builtins::registry::CommandInfo;

pub const COMMAND_INFO: CommandInfo = CommandInfo {
    name: "echo",
    usage: "echo [arg ...]",
    run,
};

pub fn run(args: &[String], _state: &mut ShellState) -> ExecutionResult {
    println!("{}", render(&args[1..]));
    ExecutionResult::KeepRunning
}

/// Join the arguments with single spaces, replacing every argument of the
/// form `$NAME` with the value of that environment variable (empty if unset).
pub fn render(args: &[String]) -> String {
    args.iter()
        .map(|arg| match arg.strip_prefix('$') {
            Some(name) => env::var_os(name)
                .map(|v| v.to_string_lossy().into_owned())
                .unwrap_or_default(),
            None => arg.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
