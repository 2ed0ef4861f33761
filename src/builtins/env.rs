use std::env;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;

use crate::engine::{ExecutionResult, ShellState};
use crate::builtins::registry::CommandInfo;

pub const COMMAND_INFO_ENV: CommandInfo = CommandInfo {
    name: "env",
    usage: "env",
    run: env_runner,
};

pub const COMMAND_INFO_SETENV: CommandInfo = CommandInfo {
    name: "setenv",
    usage: "setenv <variable> <value>",
    run: setenv_runner,
};

/// Print every environment variable as `NAME=value`, bytes as stored.
pub fn env_runner(_args: &[String], _state: &mut ShellState) -> ExecutionResult {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (name, value) in env::vars_os() {
        let _ = out.write_all(name.as_bytes());
        let _ = out.write_all(b"=");
        let _ = out.write_all(value.as_bytes());
        let _ = out.write_all(b"\n");
    }
    ExecutionResult::KeepRunning
}

pub fn setenv_runner(args: &[String], _state: &mut ShellState) -> ExecutionResult {
    match (args.get(1), args.get(2)) {
        (Some(name), Some(value)) => {
            if let Err(e) = set(name, value) {
                eprintln!("minish: setenv: {}", e);
            }
        }
        _ => eprintln!("Usage: {}", COMMAND_INFO_SETENV.usage),
    }
    ExecutionResult::KeepRunning
}

/// Set `name` for the rest of the session and for every later child.
pub fn set(name: &str, value: &str) -> Result<(), String> {
    if name.is_empty() || name.contains(['=', '\0']) {
        return Err(format!("'{}': not a valid identifier", name));
    }
    if value.contains('\0') {
        return Err(format!("{}: value contains a NUL byte", name));
    }
    // The shell is single-threaded.
    unsafe { env::set_var(name, value); }
    Ok(())
}
