//! A1-style range references and the offsets they imply.
//!
//! A reference is either a bare sheet name (`People`) or a sheet name plus a
//! rectangular A1 range (`People!B4:C11`). Bounds may be open on either axis:
//! `A:E` spans whole columns, `A5:C` runs from row 5 to the end of the data.
//! The offsets ([`RangeRef::rows_before`], [`RangeRef::cols_before`]) count
//! how many sheet rows/columns precede the range, which is what converts a
//! range-relative record index into an absolute sheet coordinate.

use std::borrow::Cow;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::column::{index_to_letters, letters_to_index};

/// Trailing `!<COLS><ROWS>:<COLS><ROWS>` pattern. Every group is optional so
/// open-ended bounds (`A:E`, `A5:C`, `4:10`) all match; a string without the
/// pattern names a whole sheet.
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(.*)!)?([A-Za-z]{0,3})([0-9]*):([A-Za-z]{0,3})([0-9]*)$")
        .expect("range pattern must compile")
});

/// Parsed A1-style range reference.
///
/// Columns are zero-based indices (rendered back through the column codec),
/// rows are 1-based as written. `None` on any bound means unbounded in that
/// direction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct RangeRef {
    pub sheet: String,
    pub first_col: Option<u32>,
    pub first_row: Option<u32>,
    pub last_col: Option<u32>,
    pub last_row: Option<u32>,
}

impl RangeRef {
    /// Parse a range reference. Never fails: anything that does not end in a
    /// recognizable `!A1:B2`-style suffix is taken as a whole-sheet
    /// reference. Single-quoted sheet names are unquoted.
    pub fn parse(input: &str) -> RangeRef {
        let Some(caps) = RANGE_RE.captures(input) else {
            return RangeRef {
                sheet: unquote(input).into_owned(),
                ..RangeRef::default()
            };
        };
        let sheet = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        RangeRef {
            sheet: unquote(sheet).into_owned(),
            first_col: capture_col(&caps, 2),
            first_row: capture_row(&caps, 3),
            last_col: capture_col(&caps, 4),
            last_row: capture_row(&caps, 5),
        }
    }

    /// Sheet name with any range suffix and quoting stripped.
    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    /// Number of sheet rows preceding the range. An absent row bound counts
    /// as unbounded-large, so the present bound decides; a range with no row
    /// numbers at all starts at row 1.
    pub fn rows_before(&self) -> u32 {
        match (self.first_row, self.last_row) {
            (None, None) => 0,
            (Some(row), None) | (None, Some(row)) => row - 1,
            (Some(a), Some(b)) => a.min(b) - 1,
        }
    }

    /// Number of sheet columns preceding the range. Absent column bounds
    /// default to column `A`.
    pub fn cols_before(&self) -> u32 {
        self.first_col.unwrap_or(0).min(self.last_col.unwrap_or(0))
    }

    /// Whether the reference names a whole sheet (no range suffix).
    pub fn is_whole_sheet(&self) -> bool {
        self.first_col.is_none()
            && self.first_row.is_none()
            && self.last_col.is_none()
            && self.last_row.is_none()
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_sheet_name(&self.sheet))?;
        if self.is_whole_sheet() {
            return Ok(());
        }
        write!(f, "!")?;
        write_bound(f, self.first_col, self.first_row)?;
        write!(f, ":")?;
        write_bound(f, self.last_col, self.last_row)
    }
}

fn write_bound(f: &mut fmt::Formatter<'_>, col: Option<u32>, row: Option<u32>) -> fmt::Result {
    if let Some(col) = col {
        write!(f, "{}", index_to_letters(col))?;
    }
    if let Some(row) = row {
        write!(f, "{row}")?;
    }
    Ok(())
}

fn capture_col(caps: &regex::Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .and_then(letters_to_index)
}

fn capture_row(caps: &regex::Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|row| *row >= 1)
}

/// Strip one level of single quotes from a sheet name, undoing the `''`
/// escape the A1 dialect uses for embedded quotes.
fn unquote(name: &str) -> Cow<'_, str> {
    let trimmed = name
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''));
    match trimmed {
        Some(inner) if inner.contains("''") => Cow::Owned(inner.replace("''", "'")),
        Some(inner) => Cow::Borrowed(inner),
        None => Cow::Borrowed(name),
    }
}

/// Quote a sheet name for A1 output when it contains anything beyond
/// letters, digits, and underscores.
pub fn quote_sheet_name(name: &str) -> Cow<'_, str> {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("'{}'", name.replace('\'', "''")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_sheet_reference() {
        let range = RangeRef::parse("Sheet1");
        assert_eq!(range.sheet_name(), "Sheet1");
        assert!(range.is_whole_sheet());
        assert_eq!(range.rows_before(), 0);
        assert_eq!(range.cols_before(), 0);
    }

    #[test]
    fn bounded_range() {
        let range = RangeRef::parse("Sheet1!B4:C11");
        assert_eq!(range.sheet_name(), "Sheet1");
        assert_eq!(range.first_col, Some(1));
        assert_eq!(range.first_row, Some(4));
        assert_eq!(range.last_col, Some(2));
        assert_eq!(range.last_row, Some(11));
        assert_eq!(range.rows_before(), 3);
        assert_eq!(range.cols_before(), 1);
    }

    #[test]
    fn open_row_bounds() {
        assert_eq!(RangeRef::parse("Sheet1!A:E").rows_before(), 0);
        assert_eq!(RangeRef::parse("Sheet1!H5:AL").rows_before(), 4);
        assert_eq!(RangeRef::parse("Sheet1!H:AL5").rows_before(), 4);
    }

    #[test]
    fn column_offsets() {
        assert_eq!(RangeRef::parse("Sheet1!C1:E10").cols_before(), 2);
        assert_eq!(RangeRef::parse("Sheet1!A:E").cols_before(), 0);
        assert_eq!(RangeRef::parse("Sheet1!4:10").cols_before(), 0);
    }

    #[test]
    fn quoted_sheet_names() {
        let range = RangeRef::parse("'My Sheet'!A1:B2");
        assert_eq!(range.sheet_name(), "My Sheet");
        assert_eq!(range.first_row, Some(1));

        let escaped = RangeRef::parse("'It''s data'");
        assert_eq!(escaped.sheet_name(), "It's data");
    }

    #[test]
    fn sheet_names_containing_bangs() {
        let range = RangeRef::parse("Totals!2024!A1:B2");
        assert_eq!(range.sheet_name(), "Totals!2024");
        assert_eq!(range.rows_before(), 0);
    }

    #[test]
    fn display_roundtrip() {
        for input in ["Sheet1", "Sheet1!B4:C11", "Sheet1!A5:C", "Sheet1!A:E"] {
            let range = RangeRef::parse(input);
            assert_eq!(range.to_string(), input);
            assert_eq!(RangeRef::parse(&range.to_string()), range);
        }
        let quoted = RangeRef::parse("'My Sheet'!A1:B2");
        assert_eq!(quoted.to_string(), "'My Sheet'!A1:B2");
    }

    #[test]
    fn zero_row_is_ignored() {
        let range = RangeRef::parse("Sheet1!A0:B2");
        assert_eq!(range.first_row, None);
        assert_eq!(range.rows_before(), 1);
    }
}
