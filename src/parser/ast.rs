use std::fmt;

// ── Operator tokens ────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    /// `>  file` — create/truncate file, becomes stdout
    RedirectOut,
    /// `<  file` — open file read-only, becomes stdin
    RedirectIn,
    /// `|` — connect two commands with an anonymous pipe
    Pipe,
}

impl Operator {
    /// Operators are only recognised as standalone tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            ">" => Some(Operator::RedirectOut),
            "<" => Some(Operator::RedirectIn),
            "|" => Some(Operator::Pipe),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::RedirectOut => ">",
            Operator::RedirectIn => "<",
            Operator::Pipe => "|",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Execution plan ─────────────────────────────────────────────────────────

/// I/O redirection applied to a single command.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Redirect {
    /// Read stdin from the file.
    Input(String),
    /// Write stdout to the file (created with mode 0644, truncated).
    Output(String),
}

impl Redirect {
    pub fn path(&self) -> &str {
        match self {
            Redirect::Input(path) | Redirect::Output(path) => path,
        }
    }
}

/// What the first operator in an argument vector turned the line into.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Plan {
    /// One command, with at most one redirection.
    Single {
        argv: Vec<String>,
        redirect: Option<Redirect>,
    },
    /// `left | right`; the right segment is passed through verbatim.
    Pipe {
        left: Vec<String>,
        right: Vec<String>,
    },
}

/// A tokenized line with the trailing `&` already stripped.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParsedLine {
    pub argv: Vec<String>,
    pub background: bool,
}

impl ParsedLine {
    pub fn name(&self) -> &str {
        // parse_line never hands out an empty vector
        &self.argv[0]
    }
}
