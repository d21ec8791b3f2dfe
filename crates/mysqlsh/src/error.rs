//! Error types for mysqlsh

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Connect(#[source] sqlx::Error),

    #[error("{0}")]
    Query(#[source] sqlx::Error),

    #[error("{0}")]
    Introspection(#[source] sqlx::Error),

    #[error("row has {actual} values but the result has {expected} columns")]
    RowShape { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error means the session is gone, not just the statement.
    pub fn is_connection_lost(&self) -> bool {
        let source = match self {
            Error::Connect(e) | Error::Query(e) | Error::Introspection(e) => e,
            _ => return false,
        };
        matches!(
            source,
            sqlx::Error::Io(_) | sqlx::Error::Protocol(_) | sqlx::Error::Tls(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_lost_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        assert!(Error::Query(sqlx::Error::Io(io)).is_connection_lost());
        assert!(Error::Query(sqlx::Error::Protocol("bad packet".into())).is_connection_lost());
        assert!(!Error::Query(sqlx::Error::RowNotFound).is_connection_lost());
        assert!(!Error::RowShape { expected: 1, actual: 2 }.is_connection_lost());
    }

    #[test]
    fn test_messages_carry_driver_text_only() {
        let err = Error::Query(sqlx::Error::Protocol("unexpected packet".into()));
        assert_eq!(err.to_string(), sqlx::Error::Protocol("unexpected packet".into()).to_string());
    }
}
