#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rust_xlsxwriter::{Format, Workbook};
use shiftledger::models::Entry;
use shiftledger::sheet::{Sheet, read_xlsx_bytes};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sl() -> Command {
    cargo_bin_cmd!("shiftledger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh, empty ledger directory inside the temp dir
pub fn setup_data_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftledger_data", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create data dir");
    path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

// Zero-based rows of the fixture roster.
pub const AVI_ROW: u32 = 5;
pub const TEAM_A_ROW: u32 = 6;
pub const DAVID_ROW: u32 = 7;
pub const SARA_ROW: u32 = 8;
pub const TEAM_B_ROW: u32 = 9;
pub const MOSHE_ROW: u32 = 10;

/// Roster template as edited by hand:
///
/// - title merged over A1:B1
/// - a stale day block from a previous export (C4:E4 merged, C5:E5 labels)
/// - Avi before any team header
/// - "Team A" merged across A7:E7 with David (numeric id) and Sara
/// - "Team B" merged across A10:B10 with Moshe
/// - a name without id and an id without name, both ignored
pub fn template_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    {
        let ws = workbook.add_worksheet();
        ws.set_name("Roster").unwrap();
        ws.set_right_to_left(true);

        ws.merge_range(0, 0, 0, 1, "דוח נוכחות", &bold).unwrap();
        ws.write_string(4, 0, "שם עובד").unwrap();
        ws.write_string(4, 1, "מספר עובד").unwrap();
        ws.set_column_width(0, 20).unwrap();

        ws.merge_range(3, 2, 3, 4, "old", &bold).unwrap();
        ws.write_string(4, 2, "משמרת בוקר").unwrap();
        ws.write_string(4, 3, "משמרת ערב").unwrap();
        ws.write_string(4, 4, "משמרת לילה").unwrap();

        ws.write_string(AVI_ROW, 0, "Avi").unwrap();
        ws.write_string(AVI_ROW, 1, "100").unwrap();

        ws.merge_range(TEAM_A_ROW, 0, TEAM_A_ROW, 4, "Team A", &bold).unwrap();
        ws.write_string(DAVID_ROW, 0, "David").unwrap();
        ws.write_number(DAVID_ROW, 1, 123).unwrap();
        ws.write_string(SARA_ROW, 0, "Sara").unwrap();
        ws.write_string(SARA_ROW, 1, "456").unwrap();

        ws.merge_range(TEAM_B_ROW, 0, TEAM_B_ROW, 1, "Team B", &bold).unwrap();
        ws.write_string(MOSHE_ROW, 0, "Moshe").unwrap();
        ws.write_string(MOSHE_ROW, 1, "789").unwrap();

        ws.write_string(11, 0, "Orphan").unwrap();
        ws.write_string(12, 1, "999").unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

pub fn template_sheet() -> Sheet {
    read_xlsx_bytes(&template_bytes()).expect("read fixture template")
}

/// Write the fixture template to the temp dir and return its path
pub fn write_template(name: &str) -> String {
    let path = temp_out(&format!("{name}_template"), "xlsx");
    fs::write(&path, template_bytes()).expect("write template");
    path
}

pub fn entry(date: &str, name: &str, shift: &str, action: &str, note: &str) -> Entry {
    Entry::new(date, name, shift, action, note)
}

/// Write entries as a JSON file and return its path
pub fn write_entries(name: &str, json: &str) -> String {
    let path = temp_out(&format!("{name}_entries"), "json");
    fs::write(&path, json).expect("write entries");
    path
}
