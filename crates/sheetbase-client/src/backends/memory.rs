//! In-memory transport adapter.
//!
//! Backs the integration tests and serves as the reference implementation of
//! [`SheetsTransport`]: it parses the same range and cell references a real
//! binding would send over the wire, so the addressing logic is exercised in
//! both directions. Call counters let tests assert how many remote calls an
//! operation would have cost.

use sheetbase_common::{CellValue, Grid, RangeRef, letters_to_index};

use crate::error::TransportError;
use crate::plan::CellEdit;
use crate::traits::{ReadOptions, SheetMeta, SheetsTransport, ValueInputMode};

#[derive(Clone, Debug)]
struct MemorySheet {
    meta: SheetMeta,
    rows: Vec<Vec<CellValue>>,
}

/// Grid-backed [`SheetsTransport`] with per-call counters.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    sheets: Vec<MemorySheet>,
    next_sheet_id: i64,
    pub read_calls: usize,
    pub append_calls: usize,
    pub batch_update_calls: usize,
    pub metadata_calls: usize,
    pub delete_calls: usize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        MemoryTransport::default()
    }

    /// Add a sheet with the given rows; internal ids are assigned in
    /// insertion order.
    pub fn with_sheet(mut self, name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        let meta = SheetMeta {
            name: name.to_string(),
            sheet_id: self.next_sheet_id,
        };
        self.next_sheet_id += 1;
        self.sheets.push(MemorySheet { meta, rows });
        self
    }

    /// Current rows of `name`, if the sheet exists.
    pub fn rows(&self, name: &str) -> Option<&Vec<Vec<CellValue>>> {
        self.sheets
            .iter()
            .find(|sheet| sheet.meta.name == name)
            .map(|sheet| &sheet.rows)
    }

    /// Value at a zero-based (row, col), `Empty` when out of bounds.
    pub fn cell(&self, name: &str, row: usize, col: usize) -> CellValue {
        self.rows(name)
            .and_then(|rows| rows.get(row))
            .and_then(|cells| cells.get(col))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    fn sheet_mut(&mut self, name: &str) -> Option<&mut MemorySheet> {
        self.sheets.iter_mut().find(|sheet| sheet.meta.name == name)
    }

    fn find_sheet(&self, name: &str) -> Option<&MemorySheet> {
        self.sheets.iter().find(|sheet| sheet.meta.name == name)
    }
}

/// Split `People!C3` into sheet name and zero-based (row, col). The sheet
/// part goes back through the range parser so quoted names resolve the same
/// way they do on the read path.
fn split_cell_ref(cell: &str) -> Option<(String, usize, usize)> {
    let (sheet_part, addr) = cell.rsplit_once('!')?;
    let letters_len = addr.bytes().take_while(u8::is_ascii_alphabetic).count();
    let col = letters_to_index(&addr[..letters_len])?;
    let row: u32 = addr[letters_len..].parse().ok()?;
    if row == 0 {
        return None;
    }
    let sheet = RangeRef::parse(sheet_part).sheet;
    Some((sheet, (row - 1) as usize, col as usize))
}

impl SheetsTransport for MemoryTransport {
    fn get_values(
        &mut self,
        _file_id: &str,
        range: &str,
        _options: &ReadOptions,
    ) -> Result<Grid, TransportError> {
        self.read_calls += 1;
        let parsed = RangeRef::parse(range);
        let sheet = self
            .find_sheet(parsed.sheet_name())
            .ok_or_else(|| TransportError::InvalidRange(range.to_string()))?;

        let row_start = (parsed.rows_before() as usize).min(sheet.rows.len());
        let row_end = match (parsed.first_row, parsed.last_row) {
            (Some(a), Some(b)) => (a.max(b) as usize).min(sheet.rows.len()),
            _ => sheet.rows.len(),
        };
        let col_start = parsed.cols_before() as usize;
        let col_end = match (parsed.first_col, parsed.last_col) {
            (Some(a), Some(b)) => Some((a.max(b) + 1) as usize),
            _ => None,
        };

        let grid = sheet.rows[row_start..row_end.max(row_start)]
            .iter()
            .map(|row| {
                let upper = col_end.map_or(row.len(), |end| end.min(row.len()));
                if col_start >= upper {
                    Vec::new()
                } else {
                    row[col_start..upper].to_vec()
                }
            })
            .collect();
        Ok(grid)
    }

    fn append_values(
        &mut self,
        _file_id: &str,
        sheet: &str,
        rows: Grid,
    ) -> Result<(), TransportError> {
        self.append_calls += 1;
        let sheet = self
            .sheet_mut(sheet)
            .ok_or_else(|| TransportError::InvalidRange(sheet.to_string()))?;
        sheet.rows.extend(rows);
        Ok(())
    }

    fn batch_update_values(
        &mut self,
        _file_id: &str,
        _mode: ValueInputMode,
        edits: &[CellEdit],
    ) -> Result<(), TransportError> {
        self.batch_update_calls += 1;
        for edit in edits {
            let (sheet_name, row, col) = split_cell_ref(&edit.cell)
                .ok_or_else(|| TransportError::InvalidRange(edit.cell.clone()))?;
            let sheet = self
                .sheet_mut(&sheet_name)
                .ok_or_else(|| TransportError::InvalidRange(edit.cell.clone()))?;
            if sheet.rows.len() <= row {
                sheet.rows.resize(row + 1, Vec::new());
            }
            let cells = &mut sheet.rows[row];
            if cells.len() <= col {
                cells.resize(col + 1, CellValue::Empty);
            }
            cells[col] = edit.value.clone();
        }
        Ok(())
    }

    fn sheet_metadata(&mut self, _file_id: &str) -> Result<Vec<SheetMeta>, TransportError> {
        self.metadata_calls += 1;
        Ok(self.sheets.iter().map(|sheet| sheet.meta.clone()).collect())
    }

    fn delete_row_range(
        &mut self,
        _file_id: &str,
        sheet_id: i64,
        start: u32,
        end: u32,
    ) -> Result<(), TransportError> {
        self.delete_calls += 1;
        let sheet = self
            .sheets
            .iter_mut()
            .find(|sheet| sheet.meta.sheet_id == sheet_id)
            .ok_or_else(|| TransportError::InvalidRange(format!("sheet id {sheet_id}")))?;
        let start = (start as usize).min(sheet.rows.len());
        let end = (end as usize).clamp(start, sheet.rows.len());
        sheet.rows.drain(start..end);
        Ok(())
    }
}
