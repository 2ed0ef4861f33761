/// Seconds a foreground command may run before it is forcefully terminated.
pub const COUNTDOWN_SECS: u32 = 10;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "MINISH_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Upper bounds applied to every input line before it is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest accepted line in bytes, excluding the line terminator.
    pub max_line_len: usize,
    /// Largest number of whitespace-separated tokens per line.
    pub max_tokens: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_line_len: 1024,
            max_tokens: 128,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub limits: Limits,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        let log_filter = std::env::var(LOG_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Config {
            limits: Limits::default(),
            log_filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_line_len, 1024);
        assert_eq!(limits.max_tokens, 128);
    }
}
