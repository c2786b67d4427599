//! Transport seam between the record facade and a remote spreadsheet API.
//!
//! Implementations own credentials, HTTP, pagination, and rate limiting; the
//! facade only ever issues the five calls below, synchronously, and never
//! retries. The in-memory adapter in [`crate::backends`] is the reference
//! implementation.

use sheetbase_common::Grid;

use crate::error::TransportError;
use crate::plan::CellEdit;

/// OAuth scope required for read/write spreadsheet access. Process-wide
/// constant; transports that need a narrower scope configure it themselves.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// One sheet as reported by the remote file's metadata, in remote order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SheetMeta {
    pub name: String,
    /// Remote-internal identifier, distinct from the name and stable across
    /// renames. Row deletion addresses sheets by this id.
    pub sheet_id: i64,
}

/// How cell values are rendered on read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ValueRender {
    /// Display strings as the grid shows them.
    #[default]
    Formatted,
    /// Underlying typed values.
    Unformatted,
}

/// How date/time cells are rendered on read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DateTimeRender {
    /// Formatted display strings.
    #[default]
    Formatted,
    /// Spreadsheet serial numbers.
    Serial,
}

/// How written values are interpreted by the remote.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ValueInputMode {
    /// Stored verbatim, no parsing.
    Raw,
    /// Parsed as if typed into the grid.
    #[default]
    UserEntered,
}

/// Pass-through read configuration. The core logic never interprets these.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReadOptions {
    pub value_render: ValueRender,
    pub date_time_render: DateTimeRender,
}

/// Synchronous calls the facade needs from a spreadsheet backend.
///
/// Write calls take `&mut self`; the facade owns its transport exclusively
/// and the system has no internal concurrency.
pub trait SheetsTransport {
    /// Fetch the raw grid for an A1-style range reference.
    fn get_values(
        &mut self,
        file_id: &str,
        range: &str,
        options: &ReadOptions,
    ) -> Result<Grid, TransportError>;

    /// Append rows past the last populated row of `sheet`.
    fn append_values(
        &mut self,
        file_id: &str,
        sheet: &str,
        rows: Grid,
    ) -> Result<(), TransportError>;

    /// Apply every edit in one batched request, each targeting a single
    /// absolute cell.
    fn batch_update_values(
        &mut self,
        file_id: &str,
        mode: ValueInputMode,
        edits: &[CellEdit],
    ) -> Result<(), TransportError>;

    /// Sheets in the file, in remote order.
    fn sheet_metadata(&mut self, file_id: &str) -> Result<Vec<SheetMeta>, TransportError>;

    /// Delete the zero-based half-open row range `[start, end)` from the
    /// sheet with internal id `sheet_id`.
    fn delete_row_range(
        &mut self,
        file_id: &str,
        sheet_id: i64,
        start: u32,
        end: u32,
    ) -> Result<(), TransportError>;
}
