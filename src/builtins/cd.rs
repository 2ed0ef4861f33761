use std::env;
use std::path::PathBuf;

use crate::engine::{ExecutionResult, ShellState};
use crate::builtins::registry::CommandInfo;

pub const COMMAND_INFO_CD: CommandInfo = CommandInfo {
    name: "cd",
    usage: "cd [dir | -]",
    run: cd_runner,
};

pub const COMMAND_INFO_PWD: CommandInfo = CommandInfo {
    name: "pwd",
    usage: "pwd",
    run: pwd_runner,
};

pub fn pwd_runner(_args: &[String], _state: &mut ShellState) -> ExecutionResult {
    match env::current_dir() {
        Ok(path) => println!("{}", path.display()),
        Err(e) => eprintln!("minish: pwd: {}", e),
    }
    ExecutionResult::KeepRunning
}

pub fn cd_runner(args: &[String], state: &mut ShellState) -> ExecutionResult {
    if let Err(e) = run(args.get(1).map(String::as_str), state) {
        eprintln!("minish: cd: {}", e);
    }
    ExecutionResult::KeepRunning
}

/// Change directory to `target`, `$HOME` when absent, or the previous
/// directory for `-`.
pub fn run(target: Option<&str>, state: &mut ShellState) -> Result<(), String> {
    let current = env::current_dir().map_err(|e| e.to_string())?;

    let target = match target {
        None => env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or("HOME not set".to_string())?,
        Some("-") => state.previous_dir.clone().ok_or("OLDPWD not set".to_string())?,
        Some(dir) => PathBuf::from(dir),
    };

    env::set_current_dir(&target).map_err(|e| format!("{}: {}", target.display(), e))?;

    state.previous_dir = Some(current);
    Ok(())
}
