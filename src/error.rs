use std::io;

use nix::errno::Errno;
use thiserror::Error;

use crate::parser::Operator;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("line too long ({len} bytes, limit is {max})")]
    LineTooLong { len: usize, max: usize },

    #[error("too many arguments ({count}, limit is {max})")]
    TooManyTokens { count: usize, max: usize },

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("syntax error: missing command before `{0}'")]
    MissingCommand(Operator),

    #[error("syntax error: missing operand after `{0}'")]
    MissingTarget(Operator),

    #[error("{0}: argument contains a NUL byte")]
    NulByte(String),

    #[error("fork failed: {0}")]
    Fork(#[source] Errno),

    #[error("pipe failed: {0}")]
    Pipe(#[source] io::Error),

    #[error("wait failed: {0}")]
    Wait(#[source] Errno),
}

pub type Result<T> = std::result::Result<T, ShellError>;
