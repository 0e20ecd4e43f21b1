mod common;

use common::{
    DAVID_ROW, setup_data_dir, setup_test_db, sl, temp_out, write_entries, write_template,
};
use predicates::prelude::*;
use serde_json::Value;
use shiftledger::sheet::{CellColor, Fill, read_xlsx, write_xlsx};
use std::fs;
use std::path::Path;

struct Env {
    db: String,
    data: String,
    template: String,
}

impl Env {
    fn new(name: &str) -> Self {
        let env = Self {
            db: setup_test_db(name),
            data: setup_data_dir(name).to_string_lossy().to_string(),
            template: write_template(name),
        };
        sl().args(env.args(&["--test", "init"])).assert().success();
        env
    }

    fn args<'a>(&'a self, rest: &[&'a str]) -> Vec<&'a str> {
        let mut v = vec![
            "--db",
            self.db.as_str(),
            "--data-dir",
            self.data.as_str(),
            "--template",
            self.template.as_str(),
            "--actor",
            "tester",
        ];
        v.extend_from_slice(rest);
        v
    }
}

const ENTRIES: &str = r#"{"entries": [
    {"date": "2024-06-01", "name": "David", "shift": "בוקר", "action": "מחלה"},
    {"date": "2024-06-02", "name": "Sara", "shift": "ערב", "action": "חופש", "note": "אושר"},
    {"date": "2024-06-02", "name": "Ghost", "shift": "ערב", "action": "חופש"}
]}"#;

#[test]
fn test_init_creates_schema_and_data_dir() {
    let env = Env::new("cli_init");
    assert!(Path::new(&env.db).exists());
    assert!(Path::new(&env.data).is_dir());

    sl().args(env.args(&["log", "--print"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_teams_lists_roster() {
    let env = Env::new("cli_teams");
    sl().args(env.args(&["teams"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("מנהלי משמרת"))
        .stdout(predicate::str::contains("Team A (row 7)"))
        .stdout(predicate::str::contains("David"))
        .stdout(predicate::str::contains("Moshe"))
        .stdout(predicate::str::contains("Orphan").not());
}

#[test]
fn test_export_writes_matrix() {
    let env = Env::new("cli_export");
    let entries = write_entries("cli_export", ENTRIES);
    let out = temp_out("cli_export", "xlsx");

    sl().args(env.args(&[
        "export", "--from", "2024-06-01", "--to", "2024-06-02", "--entries", &entries, "--file",
        &out, "--force",
    ]))
    .assert()
    .success()
    .stdout(predicate::str::contains("Matrix exported"))
    .stdout(predicate::str::contains("1 entries dropped"));

    let sheet = read_xlsx(Path::new(&out)).unwrap();
    assert_eq!(sheet.value(DAVID_ROW, 2).as_text().as_deref(), Some("מחלה"));

    sl().args(env.args(&["log", "--print"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_export_rejects_reversed_range_without_writing() {
    let env = Env::new("cli_export_reversed");
    let entries = write_entries("cli_export_reversed", ENTRIES);
    let out = temp_out("cli_export_reversed", "xlsx");

    sl().args(env.args(&[
        "export", "--from", "2024-06-02", "--to", "2024-06-01", "--entries", &entries, "--file",
        &out, "--force",
    ]))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid date range"));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_export_rejects_empty_entries() {
    let env = Env::new("cli_export_empty");
    let entries = write_entries("cli_export_empty", "[]");
    let out = temp_out("cli_export_empty", "xlsx");

    sl().args(env.args(&[
        "export", "--from", "2024-06-01", "--to", "2024-06-01", "--entries", &entries, "--file",
        &out, "--force",
    ]))
    .assert()
    .failure()
    .stderr(predicate::str::contains("No entries to export"));
}

#[test]
fn test_full_payroll_cycle() {
    let env = Env::new("cli_cycle");
    let entries = write_entries("cli_cycle", ENTRIES);
    let out = temp_out("cli_cycle", "xlsx");

    sl().args(env.args(&[
        "export", "--from", "2024-06-01", "--to", "2024-06-02", "--entries", &entries, "--file",
        &out, "--force",
    ]))
    .assert()
    .success();

    // payroll recolors David's cell and hands the file back
    let mut sheet = read_xlsx(Path::new(&out)).unwrap();
    sheet.cell_mut(DAVID_ROW, 2).style.fill = Some(Fill {
        fg: Some(CellColor::Rgb(0xFFFF_C000)),
        ..Fill::solid(0)
    });
    let marked = temp_out("cli_cycle_marked", "xlsx");
    write_xlsx(&sheet, Path::new(&marked)).unwrap();

    sl().args(env.args(&["import", "--file", &marked]))
        .assert()
        .success()
        .stdout(predicate::str::contains("updated_count"));

    let output = sl().args(env.args(&["payroll", "--json"])).output().unwrap();
    assert!(output.status.success());
    let payroll: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payroll["2024-06-01|David|בוקר"]["done"], true);
    assert_eq!(payroll["2024-06-01|David|בוקר"]["by"], "tester");
    assert!(payroll.get("2024-06-02|Sara|ערב").is_none());

    // nothing touched yet
    let output = sl().args(env.args(&["dirty", "--json"])).output().unwrap();
    let dirty: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dirty.as_object().map(|o| o.len()), Some(0));

    // the ledger stores seconds: make sure the edit lands on a later one
    std::thread::sleep(std::time::Duration::from_millis(1100));

    let edit = write_entries(
        "cli_cycle_edit",
        r#"[{"date": "2024-06-01", "name": "David", "shift": "בוקר", "action": "חופש"}]"#,
    );
    sl().args(env.args(&["touch", "--entries", &edit]))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries touched"));

    let output = sl().args(env.args(&["dirty", "--json"])).output().unwrap();
    let dirty: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dirty["2024-06-01|David|בוקר"]["by"], "tester");

    sl().args(env.args(&["dirty"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("David"));
}

#[test]
fn test_import_rejects_file_without_headers() {
    let env = Env::new("cli_import_bad");
    let status = Path::new(&env.data).join("payroll_status.json");
    let seeded = r#"{
  "2024-06-01|David|בוקר": {
    "done": true,
    "updated_at": "2024-06-02 09:00:00",
    "by": "payroll"
  }
}"#;
    fs::write(&status, seeded).unwrap();

    sl().args(env.args(&["import", "--file", &env.template]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed document"));

    assert_eq!(fs::read_to_string(&status).unwrap(), seeded);
    let output = sl().args(env.args(&["payroll", "--json"])).output().unwrap();
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["2024-06-01|David|בוקר"]["updated_at"], "2024-06-02 09:00:00");
    assert_eq!(json["2024-06-01|David|בוקר"]["by"], "payroll");
}

#[test]
fn test_reset_requires_confirmation() {
    let env = Env::new("cli_reset");
    let edit = write_entries(
        "cli_reset",
        r#"[{"date": "2024-06-01", "name": "David", "shift": "בוקר", "action": "חופש"}]"#,
    );
    sl().args(env.args(&["touch", "--entries", &edit])).assert().success();

    sl().args(env.args(&["reset"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));
    let touch_log = Path::new(&env.data).join("touch_log.json");
    assert!(fs::read_to_string(&touch_log).unwrap().contains("David"));

    sl().args(env.args(&["reset", "--yes"])).assert().success();
    assert_eq!(fs::read_to_string(&touch_log).unwrap().trim(), "{}");

    sl().args(env.args(&["log", "--print"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("reset"))
        .stdout(predicate::str::contains("update entry").not());
}
