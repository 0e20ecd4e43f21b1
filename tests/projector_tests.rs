mod common;

use common::{
    AVI_ROW, DAVID_ROW, MOSHE_ROW, SARA_ROW, TEAM_A_ROW, TEAM_B_ROW, entry, template_sheet,
};
use shiftledger::core::export::ExportLogic;
use shiftledger::errors::AppError;
use shiftledger::matrix::layout::{DEFAULT_TEAM, EXPORT_HIGHLIGHT, SHIFT_ROW, TEAM_FILL};
use shiftledger::matrix::{DateRange, parse_template, project, rebuild};
use shiftledger::models::{Entry, parse_entries};
use shiftledger::sheet::{BorderLine, CellValue, Fill, MergeRange, Sheet};

fn june(days: u32) -> DateRange {
    DateRange::parse("2024-06-01", &format!("2024-06-{days:02}")).unwrap()
}

fn export(entries: &[Entry], range: DateRange) -> Sheet {
    let (sheet, _) = ExportLogic::build_report(&template_sheet(), DEFAULT_TEAM, entries, range)
        .expect("build report");
    sheet
}

#[test]
fn test_entry_lands_in_first_shift_column() {
    let sheet = export(&[entry("2024-06-01", "David", "בוקר", "מחלה", "")], june(2));

    let cell = sheet.cell(DAVID_ROW, 2).expect("projected cell");
    assert_eq!(cell.value, CellValue::Text("מחלה".into()));
    assert_eq!(cell.style.fill, Some(Fill::solid(EXPORT_HIGHLIGHT)));
    assert_eq!(cell.style.borders.top, Some(BorderLine::Thin));

    // nothing else on David's row
    for col in 3..=7 {
        assert!(sheet.value(DAVID_ROW, col).is_blank());
    }
}

#[test]
fn test_display_text_combinations() {
    let entries = [
        entry("2024-06-01", "Sara", "ערב", "חופש", "יום הולדת"),
        entry("2024-06-02", "Sara", "לילה", "", "הערה בלבד"),
        entry("2024-06-02", "Moshe", "morning", "מילואים", ""),
    ];
    let sheet = export(&entries, june(2));

    assert_eq!(
        sheet.value(SARA_ROW, 3),
        &CellValue::Text("חופש – יום הולדת".into())
    );
    assert_eq!(sheet.value(SARA_ROW, 7), &CellValue::Text("הערה בלבד".into()));
    assert_eq!(sheet.value(MOSHE_ROW, 5), &CellValue::Text("מילואים".into()));
}

#[test]
fn test_last_write_wins() {
    let entries = [
        entry("2024-06-01", "Avi", "בוקר", "מחלה", ""),
        entry("2024-06-01", "Avi", "בוקר", "חופש", "מעודכן"),
    ];
    let sheet = export(&entries, june(1));
    assert_eq!(sheet.value(AVI_ROW, 2), &CellValue::Text("חופש – מעודכן".into()));
}

#[test]
fn test_unresolvable_entries_are_dropped() {
    let entries = [
        entry("2024-06-01", "David", "בוקר", "מחלה", ""),
        entry("2024-06-01", "Nobody", "בוקר", "מחלה", ""),
        entry("2024-06-01", "David", "", "מחלה", ""),
        entry("2024-06-01", "David", "צהריים", "מחלה", ""),
        entry("2024-07-01", "David", "ערב", "מחלה", ""),
        entry("not a date", "David", "ערב", "מחלה", ""),
        entry("2024-06-01", "", "ערב", "מחלה", ""),
        entry("2024-06-01", "Orphan", "ערב", "מחלה", ""),
    ];

    let template = template_sheet();
    let roster = parse_template(&template, DEFAULT_TEAM);
    let mut sheet = template.clone();
    rebuild(&mut sheet, june(1));
    let report = project(&mut sheet, &roster, &entries, june(1));

    assert_eq!(report.placed, 1);
    assert_eq!(report.dropped, 7);
}

#[test]
fn test_export_requires_entries() {
    let err = ExportLogic::build_report(&template_sheet(), DEFAULT_TEAM, &[], june(1)).unwrap_err();
    assert!(matches!(err, AppError::NoEntries));
}

#[test]
fn test_team_rows_span_the_final_width() {
    let sheet = export(&[entry("2024-06-03", "Sara", "לילה", "מחלה", "")], june(3));
    let last = 2 + 3 * 3 - 1;

    for (row, name) in [(TEAM_A_ROW, "Team A"), (TEAM_B_ROW, "Team B")] {
        assert!(sheet.merges().contains(&MergeRange::new(row, 0, row, last)));
        assert_eq!(sheet.value(row, 0), &CellValue::Text(name.into()));
        for col in 0..=last {
            let style = &sheet.cell(row, col).unwrap().style;
            assert_eq!(style.fill, Some(Fill::solid(TEAM_FILL)));
            assert_eq!(style.borders.bottom, Some(BorderLine::Thick));
            assert!(style.bold);
        }
    }
}

#[test]
fn test_grid_borders_keep_block_outlines() {
    let sheet = export(&[entry("2024-06-01", "Avi", "ערב", "מחלה", "")], june(2));

    let day_start = sheet.cell(SHIFT_ROW, 5).unwrap().style.borders;
    assert_eq!(day_start.left, Some(BorderLine::Thick));

    // an untouched employee cell got the thin grid
    let plain = sheet.cell(MOSHE_ROW, 6).unwrap().style.borders;
    assert_eq!(plain.left, Some(BorderLine::Thin));
    assert_eq!(plain.bottom, Some(BorderLine::Thin));
}

#[test]
fn test_export_keeps_roster_parseable() {
    let sheet = export(&[entry("2024-06-01", "David", "בוקר", "מחלה", "")], june(2));
    let before = parse_template(&template_sheet(), DEFAULT_TEAM);
    let after = parse_template(&sheet, DEFAULT_TEAM);
    assert_eq!(before, after);
}

#[test]
fn test_entries_file_shapes() {
    let bare = r#"[{"date":"2024-06-01","name":"David","shift":"בוקר","action":"מחלה"}]"#;
    let wrapped = r#"{"entries":[{"date":"2024-06-01","name":"David","shift":"בוקר","note":"x","extra":1}]}"#;

    assert_eq!(parse_entries(bare).unwrap().len(), 1);
    let entries = parse_entries(wrapped).unwrap();
    assert_eq!(entries[0].display_text(), "x");

    assert!(matches!(parse_entries("{\"nope\": 1}"), Err(AppError::InvalidEntries(_))));
}
