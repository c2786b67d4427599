//! Grid-to-record mapping and predicate search.
//!
//! The first row of a mapped grid supplies field names; every following row
//! becomes a [`Record`] whose field order always equals header column order.
//! Records are backed by an ordered pair list rather than a hash map so that
//! iteration order is the header order by construction, not by accident.

use std::slice;

use crate::column::index_to_letters;
use crate::error::RecordError;
use crate::value::{CellValue, Grid, loose_eq};

/// One data row keyed by header field names, in header column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    /// Value of `field`, if this record carries it.
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == field)
    }

    /// Fields in header column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Ordered records positionally aligned with a grid's data rows: record `i`
/// came from physical sheet row `i + rows_before + 2` (1-based, header row
/// consumed).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Map a grid whose first row is the header row.
    ///
    /// Header resolution scans left to right: a non-empty cell's text is the
    /// field name, with `'_'` appended repeatedly while it collides with a
    /// name assigned earlier in the row; an empty cell gets the zero-based
    /// column index as its name. Data rows are padded with empty values up
    /// to the header width and truncated past it.
    pub fn from_grid(grid: Grid) -> RecordSet {
        let mut rows = grid.into_iter();
        let Some(header) = rows.next() else {
            return RecordSet::default();
        };
        let mut names: Vec<String> = Vec::with_capacity(header.len());
        for (index, cell) in header.iter().enumerate() {
            let mut name = if cell.is_empty() {
                index.to_string()
            } else {
                cell.to_string()
            };
            while names.iter().any(|taken| taken == &name) {
                name.push('_');
            }
            names.push(name);
        }

        let records = rows
            .map(|row| {
                let padded = row
                    .into_iter()
                    .chain(std::iter::repeat(CellValue::Empty))
                    .take(names.len());
                names.iter().cloned().zip(padded).collect()
            })
            .collect();
        RecordSet { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Index of the first record whose `field` loosely equals `value`.
    ///
    /// A record visited before a match that lacks `field` is a hard
    /// [`RecordError::MissingField`]; zero matches is the soft `Ok(None)`.
    pub fn find_first_index(
        &self,
        field: &str,
        value: &CellValue,
    ) -> Result<Option<usize>, RecordError> {
        for (index, record) in self.records.iter().enumerate() {
            let Some(cell) = record.get(field) else {
                return Err(RecordError::MissingField(field.to_string()));
            };
            if loose_eq(cell, value) {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Indices of every record whose `field` loosely equals `value`, in
    /// record order. Same field-missing contract as
    /// [`RecordSet::find_first_index`].
    pub fn find_all_indices(
        &self,
        field: &str,
        value: &CellValue,
    ) -> Result<Vec<usize>, RecordError> {
        let mut indices = Vec::new();
        for (index, record) in self.records.iter().enumerate() {
            let Some(cell) = record.get(field) else {
                return Err(RecordError::MissingField(field.to_string()));
            };
            if loose_eq(cell, value) {
                indices.push(index);
            }
        }
        Ok(indices)
    }

    /// Column letter addressing `field`, offset by `cols_before`.
    ///
    /// Scans the first record's field ordering without breaking, so when a
    /// field name somehow occurs twice the last occurrence wins. `None` when
    /// the field is absent; write planners skip such fields silently.
    pub fn column_letter_for(&self, field: &str, cols_before: u32) -> Option<String> {
        let first = self.records.first()?;
        let mut found = None;
        for (index, (name, _)) in first.fields.iter().enumerate() {
            if name == field {
                found = Some(index as u32);
            }
        }
        found.map(|index| index_to_letters(index + cols_before))
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        RecordSet { records }
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
