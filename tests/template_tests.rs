mod common;

use common::{AVI_ROW, DAVID_ROW, MOSHE_ROW, SARA_ROW, TEAM_A_ROW, TEAM_B_ROW, template_sheet};
use shiftledger::matrix::layout::DEFAULT_TEAM;
use shiftledger::matrix::{is_team_row, parse_template};
use shiftledger::models::TeamLabel;
use shiftledger::sheet::{CellValue, MergeRange, Sheet};

fn names(sheet: &Sheet) -> Vec<(String, Vec<(String, u32)>)> {
    let roster = parse_template(sheet, DEFAULT_TEAM);
    roster
        .teams
        .iter()
        .map(|t| {
            (
                roster.team_name(t).to_string(),
                t.employees.iter().map(|e| (e.name.clone(), e.row)).collect(),
            )
        })
        .collect()
}

#[test]
fn test_parse_fixture_teams_in_sheet_order() {
    let sheet = template_sheet();
    let roster = parse_template(&sheet, DEFAULT_TEAM);

    assert_eq!(roster.teams.len(), 3);

    let ungrouped = &roster.teams[0];
    assert_eq!(ungrouped.label, TeamLabel::Ungrouped);
    assert_eq!(ungrouped.anchor_row, None);
    assert_eq!(roster.team_name(ungrouped), "מנהלי משמרת");
    assert_eq!(ungrouped.employees.len(), 1);
    assert_eq!(ungrouped.employees[0].name, "Avi");
    assert_eq!(ungrouped.employees[0].row, AVI_ROW);

    let team_a = &roster.teams[1];
    assert_eq!(team_a.label, TeamLabel::Named("Team A".into()));
    assert_eq!(team_a.anchor_row, Some(TEAM_A_ROW));
    let rows: Vec<_> = team_a.employees.iter().map(|e| (e.name.as_str(), e.row)).collect();
    assert_eq!(rows, vec![("David", DAVID_ROW), ("Sara", SARA_ROW)]);
    // numeric ids come back without decimals
    assert_eq!(team_a.employees[0].external_id, "123");

    let team_b = &roster.teams[2];
    assert_eq!(team_b.anchor_row, Some(TEAM_B_ROW));
    assert_eq!(team_b.employees[0].name, "Moshe");
    assert_eq!(team_b.employees[0].row, MOSHE_ROW);
}

#[test]
fn test_rows_missing_name_or_id_are_skipped() {
    let roster = parse_template(&template_sheet(), DEFAULT_TEAM);
    assert!(roster.employees().all(|e| e.name != "Orphan"));
    assert_eq!(roster.employee_count(), 4);
}

#[test]
fn test_team_anchor_above_members() {
    let roster = parse_template(&template_sheet(), DEFAULT_TEAM);
    for team in &roster.teams {
        if let Some(anchor) = team.anchor_row {
            assert!(team.employees.iter().all(|e| e.row > anchor));
        }
    }
}

#[test]
fn test_reparse_is_stable() {
    let sheet = template_sheet();
    assert_eq!(names(&sheet), names(&sheet));
    assert_eq!(
        parse_template(&sheet, DEFAULT_TEAM),
        parse_template(&sheet.clone(), DEFAULT_TEAM)
    );
}

#[test]
fn test_empty_sheet_gives_empty_roster() {
    let roster = parse_template(&Sheet::new("Empty"), DEFAULT_TEAM);
    assert!(roster.is_empty());
    assert!(roster.teams.is_empty());
}

#[test]
fn test_headers_without_employees_give_empty_roster() {
    let mut sheet = Sheet::new("Teams only");
    sheet.set_value(5, 0, CellValue::Text("Team A".into()));
    sheet.merge(MergeRange::new(5, 0, 5, 1)).unwrap();

    let roster = parse_template(&sheet, DEFAULT_TEAM);
    assert!(roster.teams.is_empty());
}

#[test]
fn test_ten_empty_rows_end_the_table() {
    let mut sheet = Sheet::new("Gaps");
    sheet.set_value(5, 0, CellValue::Text("First".into()));
    sheet.set_value(5, 1, CellValue::Text("1".into()));
    // 9 blank rows (6..=14) keep the scan going
    sheet.set_value(15, 0, CellValue::Text("Second".into()));
    sheet.set_value(15, 1, CellValue::Text("2".into()));
    // 10 blank rows (16..=25) stop it
    sheet.set_value(26, 0, CellValue::Text("Third".into()));
    sheet.set_value(26, 1, CellValue::Text("3".into()));

    let roster = parse_template(&sheet, DEFAULT_TEAM);
    let found: Vec<_> = roster.employees().map(|e| e.name.as_str()).collect();
    assert_eq!(found, vec!["First", "Second"]);
}

#[test]
fn test_id_only_row_does_not_count_as_empty() {
    let mut sheet = Sheet::new("Ids");
    sheet.set_value(5, 0, CellValue::Text("First".into()));
    sheet.set_value(5, 1, CellValue::Text("1".into()));
    sheet.set_value(12, 1, CellValue::Text("stray id".into()));
    sheet.set_value(19, 0, CellValue::Text("Second".into()));
    sheet.set_value(19, 1, CellValue::Text("2".into()));

    let roster = parse_template(&sheet, DEFAULT_TEAM);
    assert_eq!(roster.employee_count(), 2);
}

#[test]
fn test_team_row_detection_needs_single_row_merge() {
    let mut sheet = Sheet::new("Merges");
    sheet.merge(MergeRange::new(5, 0, 5, 3)).unwrap();
    sheet.merge(MergeRange::new(7, 0, 8, 0)).unwrap();

    assert!(is_team_row(&sheet, 5));
    assert!(!is_team_row(&sheet, 7));
    assert!(!is_team_row(&sheet, 8));
    assert!(!is_team_row(&sheet, 6));
}

#[test]
fn test_duplicate_name_resolves_to_last_row() {
    let mut sheet = Sheet::new("Dups");
    for (row, id) in [(5, "1"), (6, "2")] {
        sheet.set_value(row, 0, CellValue::Text("Dana".into()));
        sheet.set_value(row, 1, CellValue::Text(id.into()));
    }
    let roster = parse_template(&sheet, DEFAULT_TEAM);
    assert_eq!(roster.row_index().get("Dana"), Some(&6));
}
