//! Accumulates input lines into one statement

use crate::error::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Upper bound on the lines collected for one statement.
pub const MAX_LINES: usize = 128;
pub const TERMINATOR: char = ';';
pub const CONTINUATION_PROMPT: &str = " > ";

pub struct StatementReader<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> StatementReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
        }
    }

    /// Read lines until one contains `;`, input ends, or `MAX_LINES` were read.
    ///
    /// The lines read are joined with single spaces. A continuation prompt is
    /// written to `out` after every line except the one holding `;`.
    /// Returns `None` once input is exhausted and nothing was read.
    pub async fn read_statement<W: Write>(&mut self, out: &mut W) -> Result<Option<String>> {
        let mut lines = Vec::new();

        while let Some(line) = self.lines.next_line().await? {
            let terminated = line.contains(TERMINATOR);
            lines.push(line);
            if terminated {
                break;
            }
            write!(out, "{}", CONTINUATION_PROMPT)?;
            out.flush()?;
            if lines.len() >= MAX_LINES {
                break;
            }
        }

        if lines.is_empty() {
            return Ok(None);
        }
        tracing::trace!(lines = lines.len(), "statement read");
        Ok(Some(lines.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_all(input: &str) -> (Vec<String>, String) {
        let mut reader = StatementReader::new(input.as_bytes());
        let mut out = Vec::new();
        let mut statements = Vec::new();
        while let Some(stmt) = reader.read_statement(&mut out).await.unwrap() {
            statements.push(stmt);
        }
        (statements, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_single_line_statement() {
        let (statements, prompts) = read_all("select 1;\n").await;
        assert_eq!(statements, vec!["select 1;"]);
        assert_eq!(prompts, "");
    }

    #[tokio::test]
    async fn test_multi_line_statement_joined_with_spaces() {
        let (statements, prompts) = read_all("select a,\nb\nfrom t;\n").await;
        assert_eq!(statements, vec!["select a, b from t;"]);
        assert_eq!(prompts, " >  > ");
    }

    #[tokio::test]
    async fn test_empty_lines_keep_single_separator() {
        let (statements, _) = read_all("\nselect 1\n\n;\n").await;
        assert_eq!(statements, vec![" select 1  ;"]);
    }

    #[tokio::test]
    async fn test_crlf_line_endings() {
        let (statements, _) = read_all("select\r\n1;\r\n").await;
        assert_eq!(statements, vec!["select 1;"]);
    }

    #[tokio::test]
    async fn test_terminator_mid_line_ends_statement() {
        let (statements, prompts) = read_all("select 1; -- trailing\nselect 2;\n").await;
        assert_eq!(statements, vec!["select 1; -- trailing", "select 2;"]);
        assert_eq!(prompts, "");
    }

    #[tokio::test]
    async fn test_stops_at_max_lines() {
        let input = "x\n".repeat(MAX_LINES + 2);
        let mut reader = StatementReader::new(input.as_bytes());
        let mut out = Vec::new();

        let first = reader.read_statement(&mut out).await.unwrap().unwrap();
        assert_eq!(first.split(' ').count(), MAX_LINES);
        assert_eq!(out, CONTINUATION_PROMPT.repeat(MAX_LINES).into_bytes());

        let rest = reader.read_statement(&mut out).await.unwrap().unwrap();
        assert_eq!(rest, "x x");
    }

    #[tokio::test]
    async fn test_terminator_on_last_allowed_line() {
        let mut input = "x\n".repeat(MAX_LINES - 1);
        input.push_str("y;\n");
        let (statements, prompts) = read_all(&input).await;
        assert_eq!(statements.len(), 1);
        assert!(statements[0].ends_with("x y;"));
        assert_eq!(prompts, CONTINUATION_PROMPT.repeat(MAX_LINES - 1));
    }

    #[tokio::test]
    async fn test_unterminated_input_at_eof() {
        let (statements, prompts) = read_all("select 1").await;
        assert_eq!(statements, vec!["select 1"]);
        assert_eq!(prompts, CONTINUATION_PROMPT);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let (statements, prompts) = read_all("").await;
        assert!(statements.is_empty());
        assert_eq!(prompts, "");
    }
}
