//! mysqlsh - a minimal interactive MySQL shell
//!
//! Reads `;`-terminated statements from standard input, runs them over a
//! single MySQL connection and prints row-returning results as tables.

pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod reader;
pub mod render;
pub mod shell;
pub mod value;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use connection::{ConnectionManager, Session};
pub use error::{Error, Result};
pub use render::TableStyle;
pub use shell::Shell;
pub use value::{ResultSet, Value};
