//! The read / execute / render loop

use crate::connection::Session;
use crate::error::Result;
use crate::executor::run_statement;
use crate::reader::StatementReader;
use crate::render::TableStyle;
use colored::Colorize;
use std::io::Write;
use tokio::io::AsyncBufRead;

/// Shown in the prompt when no database is selected.
pub const NO_DATABASE: &str = "none";

pub struct Shell<S, R, W> {
    session: S,
    reader: StatementReader<R>,
    out: W,
    style: TableStyle,
}

impl<S, R, W> Shell<S, R, W>
where
    S: Session,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(session: S, input: R, out: W, style: TableStyle) -> Self {
        Self {
            session,
            reader: StatementReader::new(input),
            out,
            style,
        }
    }

    /// Print `mysql [<db>] > `. Failing to look up the database is fatal.
    pub async fn prompt(&mut self) -> Result<()> {
        let database = self
            .session
            .current_database()
            .await?
            .unwrap_or_else(|| NO_DATABASE.to_string());

        write!(self.out, "mysql [{}] > ", database.bold())?;
        self.out.flush()?;
        Ok(())
    }

    /// Run one prompt cycle. Returns `false` once input is exhausted.
    pub async fn step(&mut self) -> Result<bool> {
        self.prompt().await?;

        let Some(sql) = self.reader.read_statement(&mut self.out).await? else {
            writeln!(self.out)?;
            return Ok(false);
        };

        run_statement(&mut self.session, &sql, &mut self.out, self.style).await?;
        Ok(true)
    }

    pub async fn run(&mut self) -> Result<()> {
        while self.step().await? {}
        tracing::debug!("end of input");
        Ok(())
    }

    pub fn into_session(self) -> S {
        self.session
    }
}
