use crate::engine::{ExecutionResult, ShellState};
use crate::builtins::registry::CommandInfo;

pub const COMMAND_INFO_EXIT: CommandInfo = CommandInfo {
    name: "exit",
    usage: "exit",
    run: exit_runner,
};

pub fn exit_runner(_args: &[String], _state: &mut ShellState) -> ExecutionResult {
    ExecutionResult::Exit
}
