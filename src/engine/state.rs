use std::path::PathBuf;

use crate::config::Limits;

/// State that outlives a single input line.
pub struct ShellState {
    pub limits: Limits,
    /// Directory before the last successful `cd`, for `cd -`.
    pub previous_dir: Option<PathBuf>,
}

impl ShellState {
    pub fn new(limits: Limits) -> Self {
        ShellState {
            limits,
            previous_dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    KeepRunning,
    Exit,
}
