use nom::{
    bytes::complete::is_not,
    character::complete::multispace0,
    combinator::all_consuming,
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
    Parser,
};

use crate::config::Limits;
use crate::error::{Result, ShellError};

// Space, tab, carriage return and newline are the only delimiters; quotes and
// backslashes are ordinary characters.
const DELIMITERS: &str = " \t\r\n";

fn parse_word(input: &str) -> IResult<&str, &str> {
    is_not(DELIMITERS).parse(input)
}

fn parse_words(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(terminated(
        many0(preceded(multispace0, parse_word)),
        multispace0,
    ))
    .parse(input)
}

/// Split `line` into an owned argument vector.
///
/// An empty or whitespace-only line yields an empty vector. More than
/// `limits.max_tokens` tokens is reported as [`ShellError::TooManyTokens`].
pub fn tokenize(line: &str, limits: &Limits) -> Result<Vec<String>> {
    let (_, words) = parse_words(line).map_err(|e| ShellError::Syntax(e.to_string()))?;

    if words.len() > limits.max_tokens {
        return Err(ShellError::TooManyTokens {
            count: words.len(),
            max: limits.max_tokens,
        });
    }

    Ok(words.into_iter().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<String> {
        tokenize(line, &Limits::default()).unwrap()
    }

    #[test]
    fn test_mixed_whitespace() {
        assert_eq!(split("a  b\tc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(split("").is_empty());
        assert!(split("   \t \r\n").is_empty());
    }

    #[test]
    fn test_trailing_newline() {
        assert_eq!(split("ls -la\n"), vec!["ls", "-la"]);
        assert_eq!(split("  ls   -la  \r\n"), vec!["ls", "-la"]);
    }

    #[test]
    fn test_quotes_are_literal() {
        assert_eq!(
            split("echo \"hello world\" a\\ b"),
            vec!["echo", "\"hello", "world\"", "a\\", "b"]
        );
    }

    #[test]
    fn test_operators_need_whitespace() {
        assert_eq!(split("ls>out"), vec!["ls>out"]);
        assert_eq!(split("ls > out"), vec!["ls", ">", "out"]);
    }

    #[test]
    fn test_token_limit() {
        let limits = Limits { max_line_len: 1024, max_tokens: 3 };
        assert_eq!(tokenize("a b c", &limits).unwrap().len(), 3);
        match tokenize("a b c d", &limits) {
            Err(ShellError::TooManyTokens { count, max }) => {
                assert_eq!(count, 4);
                assert_eq!(max, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
