//! Runs one statement and reports its outcome

use crate::connection::Session;
use crate::error::{Error, Result};
use crate::render::{render, TableStyle};
use crate::value::ResultSet;
use colored::Colorize;
use std::io::Write;
use std::time::{Duration, Instant};

pub const RECONNECT_NOTICE: &str = "Reconnecting to DB...";

#[derive(Debug)]
pub enum Outcome {
    /// The statement returned rows.
    Rows { result: ResultSet, elapsed: Duration },
    /// No rows, or a statement that never returns rows.
    Status { elapsed: Duration },
    Failed(Error),
}

/// Only the statement itself is timed; the warning lookup happens afterwards.
pub async fn execute<S: Session + ?Sized>(session: &mut S, sql: &str) -> Outcome {
    let start = Instant::now();
    let result = session.query(sql).await;
    let elapsed = start.elapsed();

    match result {
        Err(err) => {
            tracing::debug!(?elapsed, "statement failed: {}", err);
            Outcome::Failed(err)
        }
        Ok(result) if result.is_empty() || result.is_status_only() => {
            tracing::debug!(?elapsed, "statement returned no rows");
            Outcome::Status { elapsed }
        }
        Ok(result) => {
            tracing::debug!(?elapsed, rows = result.len(), "statement returned rows");
            let warnings = session.warning_count().await;
            Outcome::Rows {
                result: result.with_warnings(warnings),
                elapsed,
            }
        }
    }
}

/// Execute `sql` and print whatever the user should see about it.
///
/// Statement errors are printed, not returned; only output failures are.
pub async fn run_statement<S, W>(
    session: &mut S,
    sql: &str,
    out: &mut W,
    style: TableStyle,
) -> Result<()>
where
    S: Session + ?Sized,
    W: Write,
{
    if !session.is_connected() {
        writeln!(out, "{}", RECONNECT_NOTICE.yellow())?;
    }

    tracing::debug!("executing: {}", sql);
    match execute(session, sql).await {
        Outcome::Failed(err) => writeln!(out, "{}", err.to_string().red())?,
        Outcome::Status { .. } => {}
        Outcome::Rows { result, elapsed } => render(out, &result, elapsed, style)?,
    }
    out.flush()?;
    Ok(())
}
