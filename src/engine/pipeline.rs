use std::os::fd::AsRawFd;

use tracing::{debug, warn};

use super::child::{ChildIo, Program};
use super::launch::{spawn, wait_for};
use crate::error::{Result, ShellError};

/// Run `left | right`.
///
/// In the foreground this returns once both processes have terminated. In
/// the background both pids are reported and left to
/// [`super::background::reap`].
///
/// Both pipe ends are close-on-exec, so each child keeps only the end it
/// installed as stdin or stdout. The shell drops its copies right after the
/// second fork, which lets the reader see end-of-file.
pub fn run(left: &[String], right: &[String], background: bool) -> Result<()> {
    let writer_prog = Program::new(left)?;
    let reader_prog = Program::new(right)?;

    let (reader, writer) = std::io::pipe().map_err(ShellError::Pipe)?;

    let writer_pid = spawn(
        &writer_prog,
        ChildIo { stdout: Some(writer.as_raw_fd()), ..ChildIo::default() },
    )?;

    let reader_pid = match spawn(
        &reader_prog,
        ChildIo { stdin: Some(reader.as_raw_fd()), ..ChildIo::default() },
    ) {
        Ok(pid) => pid,
        Err(e) => {
            drop(reader);
            drop(writer);
            // nobody reads anymore; the first stage ends on EPIPE
            if let Err(wait_err) = wait_for(writer_pid) {
                warn!(pid = %writer_pid, error = %wait_err, "could not reap pipeline stage");
            }
            return Err(e);
        }
    };

    drop(reader);
    drop(writer);

    if background {
        println!("[Process ID: {}]", writer_pid);
        println!("[Process ID: {}]", reader_pid);
        return Ok(());
    }

    // waitpid on a specific pid collects it whichever stage finished first
    let first = wait_for(writer_pid);
    let second = wait_for(reader_pid);
    debug!(?first, ?second, "pipeline finished");
    first?;
    second?;
    Ok(())
}
