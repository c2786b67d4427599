//! The CRUD facade: range in, records out, predicates into batched writes.

use sheetbase_common::{CellValue, Grid, RangeRef, Record, RecordSet};

use crate::error::Result;
use crate::plan::plan_update;
use crate::traits::{ReadOptions, SheetsTransport, ValueInputMode};

/// Record-oriented client for one remote spreadsheet file.
///
/// Holds only configuration (file id, render options) and the transport
/// handle; every operation re-reads the range it works on, computes a plan
/// from that single snapshot, and issues at most one write. Nothing is
/// transactional: two independent callers racing on overlapping ranges must
/// serialize externally.
pub struct SheetClient<T> {
    transport: T,
    file_id: String,
    read_options: ReadOptions,
    input_mode: ValueInputMode,
}

impl<T: SheetsTransport> SheetClient<T> {
    pub fn new(transport: T, file_id: impl Into<String>) -> Self {
        SheetClient {
            transport,
            file_id: file_id.into(),
            read_options: ReadOptions::default(),
            input_mode: ValueInputMode::default(),
        }
    }

    /// Override the pass-through read rendering options.
    pub fn with_read_options(mut self, options: ReadOptions) -> Self {
        self.read_options = options;
        self
    }

    /// Override how written values are interpreted by the remote.
    pub fn with_input_mode(mut self, mode: ValueInputMode) -> Self {
        self.input_mode = mode;
        self
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Read a range whose first row is a header row, as records.
    pub fn read_all(&mut self, range: &str) -> Result<RecordSet> {
        let grid = self
            .transport
            .get_values(&self.file_id, range, &self.read_options)?;
        Ok(RecordSet::from_grid(grid))
    }

    /// Read a header-less range as the raw grid, no mapping.
    pub fn read_raw(&mut self, range: &str) -> Result<Grid> {
        let grid = self
            .transport
            .get_values(&self.file_id, range, &self.read_options)?;
        Ok(grid)
    }

    /// First record where `field` loosely equals `value`; `None` on no match.
    pub fn get_one_where(
        &mut self,
        range: &str,
        field: &str,
        value: &CellValue,
    ) -> Result<Option<Record>> {
        let records = self.read_all(range)?;
        let index = records.find_first_index(field, value)?;
        Ok(index.and_then(|i| records.get(i).cloned()))
    }

    /// Every record where `field` loosely equals `value`, in sheet order.
    pub fn get_all_where(
        &mut self,
        range: &str,
        field: &str,
        value: &CellValue,
    ) -> Result<Vec<Record>> {
        let records = self.read_all(range)?;
        let indices = records.find_all_indices(field, value)?;
        Ok(indices
            .into_iter()
            .filter_map(|i| records.get(i).cloned())
            .collect())
    }

    /// Append one row past the last populated row of `sheet`.
    pub fn append_one(&mut self, sheet: &str, row: Vec<CellValue>) -> Result<()> {
        self.append_many(sheet, vec![row])
    }

    /// Append several rows in one call. Empty values are written as empty
    /// text, the remote has no null.
    pub fn append_many(&mut self, sheet: &str, rows: Vec<Vec<CellValue>>) -> Result<()> {
        let rows: Grid = rows
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::sanitized).collect())
            .collect();
        #[cfg(feature = "tracing")]
        tracing::debug!(sheet, rows = rows.len(), "appending rows");
        self.transport.append_values(&self.file_id, sheet, rows)?;
        Ok(())
    }

    /// Set `edits` on every record of `range` where `field` loosely equals
    /// `value`. One snapshot read, one batched write; returns the number of
    /// cells written. Zero matches writes nothing and returns `Ok(0)`.
    pub fn update_where(
        &mut self,
        range: &str,
        field: &str,
        value: &CellValue,
        edits: &[(String, CellValue)],
    ) -> Result<usize> {
        let parsed = RangeRef::parse(range);
        let records = self.read_all(range)?;
        let plan = plan_update(
            &records,
            parsed.rows_before(),
            parsed.cols_before(),
            parsed.sheet_name(),
            field,
            value,
            edits,
        )?;
        if plan.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(range, field, "no records matched; skipping write");
            return Ok(0);
        }
        self.transport
            .batch_update_values(&self.file_id, self.input_mode, &plan)?;
        Ok(plan.len())
    }

    /// Delete the sheet row backing the first record of `range` where
    /// `field` loosely equals `value`. No match, or a sheet name the file's
    /// metadata does not know, is a no-op returning `Ok(false)`. Only the
    /// first match is deleted; bulk delete stays with the caller.
    pub fn delete_first_where(
        &mut self,
        range: &str,
        field: &str,
        value: &CellValue,
    ) -> Result<bool> {
        let parsed = RangeRef::parse(range);
        let records = self.read_all(range)?;
        let Some(index) = records.find_first_index(field, value)? else {
            return Ok(false);
        };
        // 1-based physical sheet row; the header row precedes the data rows.
        let row = index as u32 + 2 + parsed.rows_before();

        let metadata = self.transport.sheet_metadata(&self.file_id)?;
        let Some(meta) = metadata
            .iter()
            .find(|meta| meta.name == parsed.sheet_name())
        else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                sheet = parsed.sheet_name(),
                "sheet not present in file metadata; delete skipped"
            );
            return Ok(false);
        };
        self.transport
            .delete_row_range(&self.file_id, meta.sheet_id, row - 1, row)?;
        Ok(true)
    }
}
