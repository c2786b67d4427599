//! Errors surfaced by the record-mapping layer.
//!
//! Soft conditions (no match, unresolved column, unknown sheet) are plain
//! `Option`/empty results and never appear here; this module only covers the
//! hard caller-contract violations.

use std::{error::Error, fmt};

/// Errors raised while searching or addressing records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordError {
    /// A predicate or column lookup named a field that a visited record does
    /// not carry. Indicates a caller/schema mismatch, so it always
    /// propagates instead of being treated as "no match".
    MissingField(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingField(field) => {
                write!(f, "record has no field named '{field}'")
            }
        }
    }
}

impl Error for RecordError {}
