//! Cell values and result sets decoded from MySQL rows

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::fmt;

/// A single cell of a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Decode column `idx` of `row`.
    ///
    /// Columns are decoded by their server type name. Anything without a
    /// native mapping (DECIMAL, FLOAT, JSON, ENUM, zero dates, ...) keeps the
    /// text the server sent.
    pub fn from_row(row: &MySqlRow, idx: usize) -> Result<Self> {
        let raw = row.try_get_raw(idx).map_err(Error::Query)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        let type_name = raw.type_info().name().to_string();

        let decoded = match type_name.as_str() {
            name if name.ends_with("UNSIGNED") => row.try_get::<u64, _>(idx).ok().map(Value::UInt),
            "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
                row.try_get::<i64, _>(idx).ok().map(Value::Int)
            }
            "DOUBLE" => row.try_get::<f64, _>(idx).ok().map(Value::Float),
            "DATE" => row.try_get::<NaiveDate, _>(idx).ok().map(Value::Date),
            "TIME" => row.try_get::<NaiveTime, _>(idx).ok().map(Value::Time),
            "DATETIME" | "TIMESTAMP" => row.try_get::<NaiveDateTime, _>(idx).ok().map(Value::DateTime),
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
                row.try_get::<Vec<u8>, _>(idx).ok().map(Value::Bytes)
            }
            _ => None,
        };

        match decoded {
            Some(value) => Ok(value),
            None => {
                let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx).map_err(Error::Query)?;
                Ok(Value::from_text_bytes(bytes))
            }
        }
    }

    pub fn from_text_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Value::Text(text),
            Err(e) => Value::Bytes(e.into_bytes()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(v) => u64::try_from(*v).ok(),
            Value::UInt(v) => Some(*v),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
            Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => f.write_str(text),
                Err(_) => write!(f, "0x{}", hex::encode(bytes)),
            },
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Time(t) => write!(f, "{}", t),
            Value::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

/// Column names, rows and statement metadata of one executed statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    warnings: u64,
    status_only: bool,
}

impl ResultSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Outcome of a statement that returns no rows (DDL, INSERT, ...).
    pub fn status() -> Self {
        Self {
            status_only: true,
            ..Self::default()
        }
    }

    /// Build a result set from driver rows, taking column names from the first row.
    pub fn from_rows(rows: &[MySqlRow]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::status());
        };

        let columns = first
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let mut result = Self::new(columns);

        for row in rows {
            let values = (0..row.len())
                .map(|idx| Value::from_row(row, idx))
                .collect::<Result<Vec<_>>>()?;
            result.push_row(values)?;
        }
        Ok(result)
    }

    /// Append a row; its width must match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::RowShape {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn with_warnings(mut self, warnings: u64) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn warnings(&self) -> u64 {
        self.warnings
    }

    pub fn is_status_only(&self) -> bool {
        self.status_only
    }
}
