//! Code that runs between `fork` and `exec`.
//!
//! Nothing here returns: the child either becomes the target program or
//! exits with one of the codes below. Argument C strings are prepared by
//! the parent before forking.

use std::ffi::CString;
use std::io::Write;
use std::os::fd::RawFd;

use nix::libc;
use nix::unistd::execvp;

use super::redirect::{open_redirect, replace_stream};
use crate::error::{Result, ShellError};
use crate::parser::Redirect;
use crate::signals;

/// Exit code of a child whose redirection target could not be opened.
pub const REDIRECT_FAILED: i32 = 1;
/// Exit code of a child whose program could not be executed.
pub const EXEC_FAILED: i32 = 127;

/// An argument vector converted for `execvp`.
#[derive(Debug)]
pub struct Program {
    argv: Vec<CString>,
}

impl Program {
    pub fn new(args: &[String]) -> Result<Self> {
        let argv = args
            .iter()
            .map(|a| CString::new(a.as_str()).map_err(|_| ShellError::NulByte(a.clone())))
            .collect::<Result<Vec<_>>>()?;
        if argv.is_empty() {
            return Err(ShellError::Syntax("empty command".to_string()));
        }
        Ok(Program { argv })
    }

    pub fn name(&self) -> &str {
        self.argv[0].to_str().unwrap_or("?")
    }
}

/// Stream wiring for one child.
#[derive(Debug, Default)]
pub struct ChildIo<'a> {
    /// File redirection resolved by the plan.
    pub redirect: Option<&'a Redirect>,
    /// Pipe end to install as stdin.
    pub stdin: Option<RawFd>,
    /// Pipe end to install as stdout.
    pub stdout: Option<RawFd>,
}

/// Wire up the child's streams and replace its image with `program`.
pub fn exec(program: &Program, io: ChildIo<'_>) -> ! {
    signals::restore_default();

    if let Some(fd) = io.stdin {
        if let Err(e) = replace_stream(&fd, libc::STDIN_FILENO) {
            fail(EXEC_FAILED, format_args!("{}: stdin: {}", program.name(), e));
        }
    }
    if let Some(fd) = io.stdout {
        if let Err(e) = replace_stream(&fd, libc::STDOUT_FILENO) {
            fail(EXEC_FAILED, format_args!("{}: stdout: {}", program.name(), e));
        }
    }

    if let Some(redirect) = io.redirect {
        match open_redirect(redirect) {
            Ok((file, target)) => {
                if let Err(e) = replace_stream(&file, target) {
                    fail(REDIRECT_FAILED, format_args!("{}: {}", redirect.path(), e));
                }
                // the duplicate stays, the original handle is released
                drop(file);
            }
            Err(e) => fail(REDIRECT_FAILED, format_args!("{}: {}", redirect.path(), e)),
        }
    }

    // Only returns on failure.
    let err = match execvp(&program.argv[0], &program.argv) {
        Ok(never) => match never {},
        Err(e) => e,
    };
    fail(EXEC_FAILED, format_args!("{}: {}", program.name(), err.desc()))
}

fn fail(code: i32, msg: std::fmt::Arguments<'_>) -> ! {
    let _ = writeln!(std::io::stderr(), "minish: {}", msg);
    // Skip atexit handlers and stdio buffers inherited from the shell.
    unsafe { libc::_exit(code) }
}
