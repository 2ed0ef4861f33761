//! Asynchronous triggers of the shell.
//!
//! * `SIGINT` redraws the prompt. It never touches the foreground process.
//! * `SIGALRM` is the countdown: when it fires, the registered foreground
//!   process (if any) receives `SIGKILL`. The launcher observes the kill in
//!   its own wait and reports it.
//!
//! Handlers only use async-signal-safe calls (`write`, `kill`) and read
//! shared state through atomics.

use std::os::fd::BorrowedFd;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use nix::errno::Errno;
use nix::libc;
use nix::sys::signal::{
    kill, sigaction, signal, SaFlags, SigAction, SigHandler, SigSet, Signal,
};
use nix::unistd::{self, alarm};

use crate::config::COUNTDOWN_SECS;
use crate::engine::foreground;

const PROMPT_CAP: usize = 1024;

static PROMPT: [AtomicU8; PROMPT_CAP] = [const { AtomicU8::new(0) }; PROMPT_CAP];
static PROMPT_LEN: AtomicUsize = AtomicUsize::new(0);

/// Install the interrupt and countdown handlers.
pub fn init() -> nix::Result<()> {
    let on_int = SigAction::new(
        SigHandler::Handler(on_interrupt),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    let on_alrm = SigAction::new(
        SigHandler::Handler(on_countdown_expired),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    unsafe {
        sigaction(Signal::SIGINT, &on_int)?;
        sigaction(Signal::SIGALRM, &on_alrm)?;
    }
    Ok(())
}

/// Restore default dispositions in a freshly forked child.
///
/// SIGPIPE is included because the Rust runtime starts with it ignored and
/// ignored dispositions survive `exec`.
pub fn restore_default() {
    unsafe {
        let _ = signal(Signal::SIGINT, SigHandler::SigDfl);
        let _ = signal(Signal::SIGALRM, SigHandler::SigDfl);
        let _ = signal(Signal::SIGPIPE, SigHandler::SigDfl);
    }
}

/// Make `prompt` the text the interrupt handler redraws.
pub fn publish_prompt(prompt: &str) {
    let bytes = prompt.as_bytes();
    let len = bytes.len().min(PROMPT_CAP);
    PROMPT_LEN.store(0, Ordering::SeqCst);
    for (slot, &b) in PROMPT.iter().zip(&bytes[..len]) {
        slot.store(b, Ordering::Relaxed);
    }
    PROMPT_LEN.store(len, Ordering::SeqCst);
}

/// Start the foreground countdown.
pub fn arm_countdown() {
    let _ = alarm::set(COUNTDOWN_SECS);
}

/// Cancel a pending countdown. Returns the seconds that were left, if any.
pub fn disarm_countdown() -> Option<u32> {
    alarm::cancel()
}

// ── Handlers ──────────────────────────────────────────────────────────────

extern "C" fn on_interrupt(_: libc::c_int) {
    let saved = Errno::last_raw();

    let mut buf = [0u8; PROMPT_CAP + 1];
    buf[0] = b'\n';
    let len = PROMPT_LEN.load(Ordering::SeqCst);
    for (dst, src) in buf[1..=len].iter_mut().zip(PROMPT.iter()) {
        *dst = src.load(Ordering::Relaxed);
    }
    write_stdout(&buf[..=len]);

    Errno::set_raw(saved);
}

extern "C" fn on_countdown_expired(_: libc::c_int) {
    let saved = Errno::last_raw();

    if let Some(pid) = foreground::current() {
        let mut digits = [0u8; 10];
        write_stdout(b"\nProcess timed out. Terminating process ");
        write_stdout(format_decimal(pid.as_raw().unsigned_abs(), &mut digits));
        write_stdout(b".\n");
        // May race with a process that already exited; nothing to do then.
        let _ = kill(pid, Signal::SIGKILL);
    }

    Errno::set_raw(saved);
}

fn write_stdout(mut bytes: &[u8]) {
    let fd = unsafe { BorrowedFd::borrow_raw(libc::STDOUT_FILENO) };
    while !bytes.is_empty() {
        match unistd::write(fd, bytes) {
            Ok(0) => break,
            Ok(n) => bytes = &bytes[n..],
            Err(Errno::EINTR) => continue,
            Err(_) => break,
        }
    }
}

/// Render `n` in base 10 without allocating.
fn format_decimal(mut n: u32, buf: &mut [u8; 10]) -> &[u8] {
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    &buf[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        let mut buf = [0u8; 10];
        assert_eq!(format_decimal(0, &mut buf), b"0");
        assert_eq!(format_decimal(4321, &mut buf), b"4321");
        assert_eq!(format_decimal(u32::MAX, &mut buf), b"4294967295");
    }

    #[test]
    fn test_publish_prompt_truncates() {
        let long = "x".repeat(PROMPT_CAP + 10);
        publish_prompt(&long);
        assert_eq!(PROMPT_LEN.load(Ordering::SeqCst), PROMPT_CAP);

        publish_prompt("/tmp> ");
        assert_eq!(PROMPT_LEN.load(Ordering::SeqCst), 6);
        assert_eq!(PROMPT[0].load(Ordering::Relaxed), b'/');
    }
}
