//! Top-level error type for failures that abort the session.
//!
//! Recoverable player mistakes stay inside `errors::domain`; everything
//! here is fatal to the match per the error taxonomy: connection and
//! protocol failures tear the session down, configuration failures stop
//! the process before it listens.

use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Connection error ({context}): {source}")]
    Connection {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Connection closed by peer")]
    ConnectionClosed,
    #[error("Protocol error: {detail}")]
    Protocol { detail: String },
    #[error("Game rule violated: {0}")]
    Domain(#[from] DomainError),
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn protocol(detail: impl Into<String>) -> Self {
        Self::Protocol {
            detail: detail.into(),
        }
    }

    pub fn connection(context: &'static str, source: std::io::Error) -> Self {
        Self::Connection { context, source }
    }
}
