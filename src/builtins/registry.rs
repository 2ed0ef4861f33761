use crate::engine::{ExecutionResult, ShellState};
use crate::builtins;

/// A built-in receives the full argument vector, its own name included, and
/// reports its own errors.
pub type BuiltinRunner = fn(&[String], &mut ShellState) -> ExecutionResult;

pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub run: BuiltinRunner,
}

pub const BUILTINS: &[CommandInfo] = &[
    builtins::cd::COMMAND_INFO_CD,
    builtins::cd::COMMAND_INFO_PWD,
    builtins::echo::COMMAND_INFO,
    builtins::env::COMMAND_INFO_ENV,
    builtins::env::COMMAND_INFO_SETENV,
    builtins::system::COMMAND_INFO_EXIT,
];

pub fn find_command(name: &str) -> Option<&'static CommandInfo> {
    BUILTINS.iter().find(|cmd| cmd.name == name)
}
