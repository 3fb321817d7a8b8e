//! # Store Error Types
//!
//! Error types for the service layer. Protocol-level failures a client caused
//! (unknown basket, duplicate id) are *not* errors; they travel back as
//! [`Response`](crate::protocol::Response) values. These variants cover the
//! process-level failures around them.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Service-layer error type.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Startup Errors
    // =========================================================================
    /// Failed to bind the listening socket. The sole fatal startup condition.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Actor Errors
    // =========================================================================
    /// The store actor's mailbox is gone; the actor has stopped.
    #[error("store mailbox closed")]
    MailboxClosed,

    /// A join/leave/order submission did not get into the mailbox in time.
    #[error("store submission timed out after {0:?}")]
    SubmitTimeout(Duration),

    // =========================================================================
    // Protocol Errors
    // =========================================================================
    /// A wire message failed to encode or decode.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    // =========================================================================
    // Connection Errors
    // =========================================================================
    /// Socket I/O failure on an accepted connection.
    #[error("connection error: {0}")]
    Connection(#[from] std::io::Error),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidMessage(err.to_string())
    }
}

impl StoreError {
    /// True if the caller may retry the same submission.
    ///
    /// A timed-out mailbox send can be retried once the actor catches up; a
    /// closed mailbox never recovers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::SubmitTimeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(StoreError::SubmitTimeout(Duration::from_secs(5)).is_retryable());
        assert!(!StoreError::MailboxClosed.is_retryable());
        assert!(!StoreError::InvalidMessage("bad json".into()).is_retryable());
    }

    #[test]
    fn test_bind_error_display() {
        let err = StoreError::Bind {
            addr: "0.0.0.0:7667".into(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(err.to_string().contains("0.0.0.0:7667"));
    }
}
