use super::layout::{EMPTY_RUN_LIMIT, FIRST_DATA_ROW, ID_COL, NAME_COL};
use crate::models::{Employee, Roster};
use crate::sheet::{RowNum, Sheet};

/// A team header is a row carrying a merge confined to that single row.
pub fn is_team_row(sheet: &Sheet, row: RowNum) -> bool {
    sheet
        .merges()
        .iter()
        .any(|m| m.first_row == row && m.is_single_row())
}

/// Read the teams and employees of a roster template.
///
/// Scanning starts at the first data row and stops at the end of the sheet or
/// after [`EMPTY_RUN_LIMIT`] consecutive rows with neither name nor id.
/// Rows with only one of the two are skipped without ending the table.
/// A template without any employee yields an empty roster.
pub fn parse_template(sheet: &Sheet, default_team: &str) -> Roster {
    let mut roster = Roster::new(default_team);
    let Some(max_row) = sheet.max_row() else {
        return roster;
    };

    let mut empty_run = 0;
    let mut row = FIRST_DATA_ROW;

    while row <= max_row && empty_run < EMPTY_RUN_LIMIT {
        let name = sheet.value(row, NAME_COL).as_text();
        let id = sheet.value(row, ID_COL).as_text();

        match (name, id) {
            (None, None) => empty_run += 1,
            (None, Some(_)) => empty_run = 0,
            (Some(name), id) => {
                empty_run = 0;
                if is_team_row(sheet, row) {
                    roster.open_team(&name, row);
                } else if let Some(external_id) = id {
                    roster.push_employee(Employee {
                        name,
                        external_id,
                        row,
                    });
                }
            }
        }
        row += 1;
    }

    if roster.is_empty() {
        return Roster::new(default_team);
    }
    roster
}
