//! Single-slot registry of the process the control loop is blocked on.
//!
//! Written by the control loop, read by the `SIGALRM` handler. A raw pid of
//! `0` means the slot is empty.

use std::sync::atomic::{AtomicI32, Ordering};

use nix::unistd::Pid;
use tracing::debug;

use crate::signals;

static FOREGROUND: AtomicI32 = AtomicI32::new(0);

/// The currently registered foreground process, if any.
pub fn current() -> Option<Pid> {
    match FOREGROUND.load(Ordering::SeqCst) {
        0 => None,
        raw => Some(Pid::from_raw(raw)),
    }
}

fn register(pid: Pid) {
    FOREGROUND.store(pid.as_raw(), Ordering::SeqCst);
}

fn clear() {
    FOREGROUND.store(0, Ordering::SeqCst);
}

/// Keeps `pid` registered with a running countdown until dropped.
///
/// Registration happens before the countdown is armed, and on drop the
/// countdown is disarmed before the slot is cleared, so the expiry handler
/// never sees a stale or empty slot while an alarm is pending.
#[must_use = "dropping the guard immediately disarms the countdown"]
pub struct ForegroundGuard {
    pid: Pid,
}

impl ForegroundGuard {
    pub fn enter(pid: Pid) -> Self {
        register(pid);
        signals::arm_countdown();
        debug!(%pid, "foreground registered, countdown armed");
        ForegroundGuard { pid }
    }
}

impl Drop for ForegroundGuard {
    fn drop(&mut self) {
        let remaining = signals::disarm_countdown();
        clear();
        debug!(pid = %self.pid, ?remaining, "countdown disarmed, foreground cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_ordering() {
        assert_eq!(current(), None);

        let pid = Pid::from_raw(4242);
        let guard = ForegroundGuard::enter(pid);
        let registered = current();
        drop(guard);

        // the drop already cancelled the alarm
        let pending = signals::disarm_countdown();
        assert_eq!(pending, None);
        assert_eq!(registered, Some(pid));
        assert_eq!(current(), None);
    }
}
