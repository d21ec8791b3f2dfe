//! Scripted session for exercising the prompt loop without a server

use crate::connection::Session;
use crate::error::{Error, Result};
use crate::value::{ResultSet, Value};
use async_trait::async_trait;
use std::collections::VecDeque;

#[derive(Default)]
pub struct FakeSession {
    pub database: Option<String>,
    pub disconnected: bool,
    pub fail_introspection: bool,
    pub warnings: u64,
    pub warning_lookups: usize,
    pub responses: VecDeque<Result<ResultSet>>,
    pub queries: Vec<String>,
}

impl FakeSession {
    pub fn respond(mut self, response: Result<ResultSet>) -> Self {
        self.responses.push_back(response);
        self
    }
}

pub fn rows(columns: &[&str], rows: Vec<Vec<Value>>) -> ResultSet {
    let mut result = ResultSet::new(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        result.push_row(row).unwrap();
    }
    result
}

pub fn syntax_error(message: &str) -> Error {
    Error::Query(sqlx::Error::Protocol(message.to_string()))
}

#[async_trait]
impl Session for FakeSession {
    fn is_connected(&self) -> bool {
        !self.disconnected
    }

    async fn current_database(&mut self) -> Result<Option<String>> {
        if self.fail_introspection {
            return Err(Error::Introspection(sqlx::Error::Protocol(
                "server has gone away".to_string(),
            )));
        }
        Ok(self.database.clone())
    }

    async fn query(&mut self, sql: &str) -> Result<ResultSet> {
        self.queries.push(sql.to_string());
        self.disconnected = false;
        self.responses
            .pop_front()
            .unwrap_or_else(|| Ok(ResultSet::status()))
    }

    async fn warning_count(&mut self) -> u64 {
        self.warning_lookups += 1;
        self.warnings
    }
}
