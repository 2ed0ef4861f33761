mod ast;
mod tokenizer;

pub use ast::{Operator, ParsedLine, Plan, Redirect};
pub use tokenizer::tokenize;

use crate::config::Limits;
use crate::error::{Result, ShellError};

// ── Public API ────────────────────────────────────────────────────────────

/// Parse one raw input line.
///
/// Returns `Ok(None)` for an empty or whitespace-only line. A trailing
/// standalone `&` marks the line for background execution and is removed
/// before the vector is handed out.
pub fn parse_line(line: &str, limits: &Limits) -> Result<Option<ParsedLine>> {
    let len = line.trim_end_matches(['\n', '\r']).len();
    if len > limits.max_line_len {
        return Err(ShellError::LineTooLong { len, max: limits.max_line_len });
    }

    let mut argv = tokenize(line, limits)?;

    let background = argv.last().is_some_and(|t| t == "&");
    if background {
        argv.pop();
    }

    if argv.is_empty() {
        return Ok(None);
    }

    Ok(Some(ParsedLine { argv, background }))
}

/// Scan `argv` left to right and act on the first operator token only.
///
/// Tokens after a redirection target are dropped with the operator. For a
/// pipe, everything after the `|` becomes the second command verbatim, so a
/// later `>`, `<` or `|` reaches that command as a plain argument.
pub fn build_plan(mut argv: Vec<String>) -> Result<Plan> {
    let found = argv
        .iter()
        .enumerate()
        .find_map(|(i, t)| Operator::from_token(t).map(|op| (i, op)));

    let Some((pos, op)) = found else {
        return Ok(Plan::Single { argv, redirect: None });
    };

    if pos == 0 {
        return Err(ShellError::MissingCommand(op));
    }

    match op {
        Operator::RedirectOut | Operator::RedirectIn => {
            let target = argv.get(pos + 1).cloned().ok_or(ShellError::MissingTarget(op))?;
            argv.truncate(pos);
            let redirect = if op == Operator::RedirectOut {
                Redirect::Output(target)
            } else {
                Redirect::Input(target)
            };
            Ok(Plan::Single { argv, redirect: Some(redirect) })
        }
        Operator::Pipe => {
            let right = argv.split_off(pos + 1);
            argv.truncate(pos);
            if right.is_empty() {
                return Err(ShellError::MissingTarget(op));
            }
            Ok(Plan::Pipe { left: argv, right })
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    fn parse(line: &str) -> Option<ParsedLine> {
        parse_line(line, &Limits::default()).unwrap()
    }

    // ── parse_line ────────────────────────────────────────────────────────

    #[test]
    fn test_blank_line_is_none() {
        assert!(parse("").is_none());
        assert!(parse(" \t \n").is_none());
    }

    #[test]
    fn test_simple_foreground() {
        let line = parse("ls -la\n").unwrap();
        assert_eq!(line.argv, vec!["ls", "-la"]);
        assert_eq!(line.name(), "ls");
        assert!(!line.background);
    }

    #[test]
    fn test_trailing_ampersand() {
        let line = parse("sleep 5 &").unwrap();
        assert_eq!(line.argv, vec!["sleep", "5"]);
        assert!(line.background);
    }

    #[test]
    fn test_ampersand_only_at_end() {
        let line = parse("echo & done").unwrap();
        assert_eq!(line.argv, vec!["echo", "&", "done"]);
        assert!(!line.background);

        // glued to the previous token it is an ordinary character
        let line = parse("sleep 5&").unwrap();
        assert_eq!(line.argv, vec!["sleep", "5&"]);
        assert!(!line.background);
    }

    #[test]
    fn test_lone_ampersand_is_empty() {
        assert!(parse("&").is_none());
    }

    #[test]
    fn test_line_limit() {
        let limits = Limits { max_line_len: 8, max_tokens: 128 };
        assert!(parse_line("12345678\n", &limits).unwrap().is_some());
        match parse_line("123456789", &limits) {
            Err(ShellError::LineTooLong { len, max }) => {
                assert_eq!(len, 9);
                assert_eq!(max, 8);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    // ── build_plan ────────────────────────────────────────────────────────

    #[test]
    fn test_no_operator() {
        let plan = build_plan(words("ls -la /tmp")).unwrap();
        assert_eq!(plan, Plan::Single { argv: words("ls -la /tmp"), redirect: None });
    }

    #[test]
    fn test_output_redirect() {
        let plan = build_plan(words("ls -la > out.txt")).unwrap();
        assert_eq!(
            plan,
            Plan::Single {
                argv: words("ls -la"),
                redirect: Some(Redirect::Output("out.txt".to_string())),
            }
        );
    }

    #[test]
    fn test_input_redirect() {
        let plan = build_plan(words("sort < in.txt")).unwrap();
        assert_eq!(
            plan,
            Plan::Single {
                argv: words("sort"),
                redirect: Some(Redirect::Input("in.txt".to_string())),
            }
        );
    }

    #[test]
    fn test_redirect_truncates_rest_of_line() {
        let plan = build_plan(words("cmd > out.txt | wc -l")).unwrap();
        assert_eq!(
            plan,
            Plan::Single {
                argv: words("cmd"),
                redirect: Some(Redirect::Output("out.txt".to_string())),
            }
        );
    }

    #[test]
    fn test_pipe_split() {
        let plan = build_plan(words("ls -la | wc -l")).unwrap();
        assert_eq!(plan, Plan::Pipe { left: words("ls -la"), right: words("wc -l") });
    }

    #[test]
    fn test_pipe_first_leaves_later_operators_literal() {
        let plan = build_plan(words("cat log | grep x > out.txt")).unwrap();
        assert_eq!(
            plan,
            Plan::Pipe { left: words("cat log"), right: words("grep x > out.txt") }
        );

        let plan = build_plan(words("a | b | c")).unwrap();
        assert_eq!(plan, Plan::Pipe { left: words("a"), right: words("b | c") });
    }

    #[test]
    fn test_first_operator_wins() {
        let plan = build_plan(words("sort < in.txt > out.txt")).unwrap();
        assert_eq!(
            plan,
            Plan::Single {
                argv: words("sort"),
                redirect: Some(Redirect::Input("in.txt".to_string())),
            }
        );
    }

    #[test]
    fn test_missing_operands() {
        assert!(matches!(
            build_plan(words("ls >")),
            Err(ShellError::MissingTarget(Operator::RedirectOut))
        ));
        assert!(matches!(
            build_plan(words("ls |")),
            Err(ShellError::MissingTarget(Operator::Pipe))
        ));
        assert!(matches!(
            build_plan(words("< in.txt")),
            Err(ShellError::MissingCommand(Operator::RedirectIn))
        ));
    }
}
