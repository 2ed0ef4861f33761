use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tracing::{debug, warn};

use super::launch::Outcome;

/// Collect background processes that have finished since the last prompt.
///
/// Only called between lines: at that point every foreground process and
/// foreground pipeline stage has already been waited for, so anything left
/// is a background launch.
pub fn reap() {
    loop {
        let (pid, outcome) = match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(pid, code)) => (pid, Outcome::Exited(code)),
            Ok(WaitStatus::Signaled(pid, sig, _)) => (pid, Outcome::Signaled(sig)),
            Ok(WaitStatus::StillAlive) => break,
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => break,
            Err(e) => {
                warn!(error = %e, "failed to reap background processes");
                break;
            }
        };

        debug!(%pid, ?outcome, "background process reaped");
        println!("[Process ID: {}] {}", pid, outcome);
    }
}
