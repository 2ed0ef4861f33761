use std::fmt;
use std::io::Write;

use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult, Pid};
use tracing::debug;

use super::child::{self, ChildIo, Program};
use super::foreground::ForegroundGuard;
use crate::error::{Result, ShellError};
use crate::parser::Redirect;

/// How a waited-on process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited(i32),
    Signaled(Signal),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Exited(code) => write!(f, "exited with status {}", code),
            Outcome::Signaled(sig) => write!(f, "was killed by signal {}", *sig as i32),
        }
    }
}

/// Fork a child that applies `redirect` and executes `argv`.
///
/// In the foreground the call blocks under a [`ForegroundGuard`] until the
/// child exits or the countdown kills it. In the background the pid is
/// reported and the child is left to [`super::background::reap`].
pub fn run_single(argv: &[String], redirect: Option<&Redirect>, background: bool) -> Result<()> {
    let program = Program::new(argv)?;
    let pid = spawn(&program, ChildIo { redirect, ..ChildIo::default() })?;

    if background {
        println!("[Process ID: {}]", pid);
        return Ok(());
    }

    let guard = ForegroundGuard::enter(pid);
    let outcome = wait_for(pid)?;
    drop(guard);

    println!("Process {}", outcome);
    Ok(())
}

/// Fork and exec `program` with the given stream wiring. Returns the child pid.
pub fn spawn(program: &Program, io: ChildIo<'_>) -> Result<Pid> {
    // Anything still buffered would be written twice otherwise.
    let _ = std::io::stdout().flush();

    match unsafe { fork() }.map_err(ShellError::Fork)? {
        ForkResult::Child => child::exec(program, io),
        ForkResult::Parent { child } => {
            debug!(pid = %child, program = program.name(), "spawned");
            Ok(child)
        }
    }
}

/// Block until `pid` terminates.
pub fn wait_for(pid: Pid) -> Result<Outcome> {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => {
                debug!(%pid, code, "exited");
                return Ok(Outcome::Exited(code));
            }
            Ok(WaitStatus::Signaled(_, sig, _)) => {
                debug!(%pid, ?sig, "killed");
                return Ok(Outcome::Signaled(sig));
            }
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ShellError::Wait(e)),
        }
    }
}
