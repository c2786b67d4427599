//! Record-oriented CRUD over a remote spreadsheet.
//!
//! The facade ([`SheetClient`]) reads a rectangular range, maps it into
//! field-named records via `sheetbase-common`, and turns predicate-based
//! updates and deletes into the minimal set of absolute cell coordinates,
//! sent through one batched call on the [`SheetsTransport`] seam. Transport
//! implementations own authentication and wire concerns; an in-memory
//! adapter ships in [`backends`] for tests and as a reference.

pub mod backends;
pub mod client;
pub mod error;
pub mod plan;
pub mod traits;

pub use backends::MemoryTransport;
pub use client::SheetClient;
pub use error::{ClientError, Result, TransportError};
pub use plan::{CellEdit, plan_update};
pub use traits::{
    DateTimeRender, ReadOptions, SHEETS_SCOPE, SheetMeta, SheetsTransport, ValueInputMode,
    ValueRender,
};

// Re-export for convenience
pub use sheetbase_common::{CellValue, Grid, RangeRef, Record, RecordError, RecordSet};
