//! The single MySQL session owned by the shell

use crate::config::Config;
use crate::error::{Error, Result};
use crate::value::{ResultSet, Value};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Connection, Either, Row};

const CURRENT_DATABASE_SQL: &str = "select database()";
const WARNING_COUNT_SQL: &str = "SHOW COUNT(*) WARNINGS";

/// What the prompt loop needs from a database session.
#[async_trait]
pub trait Session: Send {
    /// Cheap liveness check, no round trip to the server.
    fn is_connected(&self) -> bool;

    /// Name of the selected database, `None` if no database is selected.
    async fn current_database(&mut self) -> Result<Option<String>>;

    /// Run one statement and return its first result.
    async fn query(&mut self, sql: &str) -> Result<ResultSet>;

    /// Warnings raised by the last statement; 0 when they cannot be read.
    async fn warning_count(&mut self) -> u64;
}

/// Owns the connection and re-opens it on the next use after it was lost.
pub struct ConnectionManager {
    options: MySqlConnectOptions,
    conn: Option<MySqlConnection>,
}

impl ConnectionManager {
    pub async fn connect(config: &Config) -> Result<Self> {
        let options = config.connect_options();
        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(Error::Connect)?;
        tracing::info!("connected to {}", config);

        Ok(Self {
            options,
            conn: Some(conn),
        })
    }

    pub async fn close(mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().await.map_err(Error::Query)?;
            tracing::debug!("connection closed");
        }
        Ok(())
    }

    async fn session(&mut self) -> Result<&mut MySqlConnection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                tracing::info!("re-establishing lost connection");
                MySqlConnection::connect_with(&self.options)
                    .await
                    .map_err(Error::Connect)?
            }
        };
        Ok(self.conn.insert(conn))
    }

    /// Forget the connection if `err` means the server is gone.
    fn observe<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_connection_lost() {
                tracing::warn!("connection lost: {}", err);
                self.conn = None;
            }
        }
        result
    }

    async fn run(&mut self, sql: &str) -> Result<ResultSet> {
        let conn = self.session().await?;
        let rows = first_result_rows(conn, sql).await?;
        ResultSet::from_rows(&rows)
    }

    async fn read_warning_count(&mut self) -> Result<u64> {
        let Some(conn) = self.conn.as_mut() else {
            return Ok(0);
        };
        let count = first_result_rows(conn, WARNING_COUNT_SQL)
            .await?
            .first()
            .map(|row| Value::from_row(row, 0))
            .transpose()?
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(count)
    }
}

/// Rows of the first result of `sql`; later results of a batch are drained and dropped.
async fn first_result_rows<'c>(conn: &'c mut MySqlConnection, sql: &'c str) -> Result<Vec<MySqlRow>> {
    let mut rows = Vec::new();
    let mut first_done = false;

    let mut stream = sqlx::raw_sql(sql).fetch_many(conn);
    while let Some(step) = stream.try_next().await.map_err(Error::Query)? {
        match step {
            Either::Left(done) => {
                tracing::debug!(rows_affected = done.rows_affected(), "statement finished");
                first_done = true;
            }
            Either::Right(row) if !first_done => rows.push(row),
            Either::Right(_) => {}
        }
    }
    Ok(rows)
}

#[async_trait]
impl Session for ConnectionManager {
    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    async fn current_database(&mut self) -> Result<Option<String>> {
        let result = async {
            let conn = self.session().await?;
            let rows = first_result_rows(conn, CURRENT_DATABASE_SQL).await?;
            match rows.first() {
                Some(row) if !row.is_empty() => Value::from_row(row, 0),
                _ => Ok(Value::Null),
            }
        }
        .await
        .map_err(|err| match err {
            Error::Query(e) => Error::Introspection(e),
            other => other,
        });

        match self.observe(result)? {
            Value::Null => Ok(None),
            value => Ok(Some(value.to_string())),
        }
    }

    /// A statement that fails because the connection dropped is sent again
    /// once on a fresh connection.
    async fn query(&mut self, sql: &str) -> Result<ResultSet> {
        let result = self.run(sql).await;
        match self.observe(result) {
            Err(err) if err.is_connection_lost() => {
                tracing::info!("retrying statement after reconnect");
                let retry = self.run(sql).await;
                self.observe(retry)
            }
            other => other,
        }
    }

    async fn warning_count(&mut self) -> u64 {
        let result = self.read_warning_count().await;
        match self.observe(result) {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!("could not read warning count: {}", err);
                0
            }
        }
    }
}
