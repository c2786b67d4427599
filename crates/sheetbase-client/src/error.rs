//! Client-side error taxonomy.
//!
//! Hard failures only: transport faults and field-name contract violations.
//! "No match", "unknown column", and "unknown sheet" are sentinel results on
//! the operations themselves, never errors.

use thiserror::Error;

pub use sheetbase_common::RecordError;

/// Failure reported by a [`crate::SheetsTransport`] implementation. Never
/// retried internally; callers decide on backoff policy.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("invalid range reference: {0}")]
    InvalidRange(String),

    #[error("quota exhausted: {0}")]
    Quota(String),

    #[error("transport failure: {0}")]
    Io(String),
}

/// Any error a [`crate::SheetClient`] operation can surface.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("spreadsheet transport: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
