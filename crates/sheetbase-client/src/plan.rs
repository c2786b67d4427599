//! Write planning: predicate matches to absolute cell coordinates.

use sheetbase_common::{CellValue, RecordError, RecordSet, quote_sheet_name};

/// One field-value assignment targeting one fully resolved cell. Built
/// transiently by [`plan_update`], consumed by a single batched transport
/// write, then discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct CellEdit {
    /// Absolute reference, e.g. `People!C3`.
    pub cell: String,
    /// Write-ready (sanitized) value, a 1x1 payload on the wire.
    pub value: CellValue,
}

/// Compute the cell edits for "set `edits` on every record where
/// `match_field` loosely equals `match_value`".
///
/// Zero matches is an empty plan, not an error. An edit field that resolves
/// to no column is skipped silently; a `match_field` missing from a record
/// propagates as [`RecordError::MissingField`]. Physical rows are
/// `index + 2 + rows_before`: sheet rows are 1-based and the header row sits
/// before the data rows.
pub fn plan_update(
    records: &RecordSet,
    rows_before: u32,
    cols_before: u32,
    sheet: &str,
    match_field: &str,
    match_value: &CellValue,
    edits: &[(String, CellValue)],
) -> Result<Vec<CellEdit>, RecordError> {
    let matches = records.find_all_indices(match_field, match_value)?;
    let sheet = quote_sheet_name(sheet);
    let mut plan = Vec::with_capacity(matches.len() * edits.len());
    for index in matches {
        let row = index as u32 + 2 + rows_before;
        for (field, value) in edits {
            let Some(letter) = records.column_letter_for(field, cols_before) else {
                continue;
            };
            plan.push(CellEdit {
                cell: format!("{sheet}!{letter}{row}"),
                value: value.clone().sanitized(),
            });
        }
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetbase_common::Grid;

    fn people() -> RecordSet {
        let grid: Grid = [
            ["id", "name", "country"],
            ["1", "Julie", "France"],
            ["2", "Julien", "France"],
            ["3", "Anna", "Spain"],
        ]
        .iter()
        .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect())
        .collect();
        RecordSet::from_grid(grid)
    }

    fn edits(pairs: &[(&str, &str)]) -> Vec<(String, CellValue)> {
        pairs
            .iter()
            .map(|(field, value)| (field.to_string(), CellValue::from(*value)))
            .collect()
    }

    #[test]
    fn two_matches_times_two_fields_is_four_edits() {
        let records = people();
        let plan = plan_update(
            &records,
            0,
            0,
            "People",
            "country",
            &CellValue::from("France"),
            &edits(&[("name", "X"), ("country", "Belgium")]),
        )
        .unwrap();
        let cells: Vec<&str> = plan.iter().map(|edit| edit.cell.as_str()).collect();
        assert_eq!(cells, vec!["People!B2", "People!C2", "People!B3", "People!C3"]);
    }

    #[test]
    fn rows_offset_by_range_position() {
        let records = people();
        // Range starting at row 4: rows_before = 3, first data row = sheet row 5.
        let plan = plan_update(
            &records,
            3,
            0,
            "People",
            "id",
            &CellValue::Int(3),
            &edits(&[("country", "Portugal")]),
        )
        .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].cell, "People!C8");
    }

    #[test]
    fn columns_offset_by_range_position() {
        let records = people();
        // Range starting at column C: cols_before = 2.
        let plan = plan_update(
            &records,
            0,
            2,
            "People",
            "id",
            &CellValue::Int(1),
            &edits(&[("name", "Jules")]),
        )
        .unwrap();
        assert_eq!(plan[0].cell, "People!D2");
    }

    #[test]
    fn zero_matches_is_an_empty_plan() {
        let records = people();
        let plan = plan_update(
            &records,
            0,
            0,
            "People",
            "country",
            &CellValue::from("Atlantis"),
            &edits(&[("name", "X")]),
        )
        .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn unresolved_edit_fields_are_skipped() {
        let records = people();
        let plan = plan_update(
            &records,
            0,
            0,
            "People",
            "id",
            &CellValue::Int(1),
            &edits(&[("ghost", "boo"), ("name", "Jules")]),
        )
        .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].cell, "People!B2");
    }

    #[test]
    fn missing_match_field_propagates() {
        let records = people();
        let err = plan_update(
            &records,
            0,
            0,
            "People",
            "ghost",
            &CellValue::Int(1),
            &edits(&[("name", "X")]),
        )
        .unwrap_err();
        assert_eq!(err, RecordError::MissingField("ghost".to_string()));
    }

    #[test]
    fn empty_values_are_sanitized() {
        let records = people();
        let plan = plan_update(
            &records,
            0,
            0,
            "People",
            "id",
            &CellValue::Int(1),
            &[("name".to_string(), CellValue::Empty)],
        )
        .unwrap();
        assert_eq!(plan[0].value, CellValue::Text(String::new()));
    }

    #[test]
    fn sheet_names_needing_quotes_are_quoted() {
        let records = people();
        let plan = plan_update(
            &records,
            0,
            0,
            "Team Roster",
            "id",
            &CellValue::Int(1),
            &edits(&[("name", "X")]),
        )
        .unwrap();
        assert_eq!(plan[0].cell, "'Team Roster'!B2");
    }
}
