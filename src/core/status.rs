use crate::errors::AppResult;
use crate::ledger::Reconciler;
use crate::models::{EntryKey, Shift};
use crate::ui::messages::{info, warning};
use crate::utils::table::{Column, Table};

pub struct StatusLogic;

fn key_cells(key: &EntryKey) -> Vec<String> {
    vec![
        key.date.format("%Y-%m-%d").to_string(),
        key.employee.clone(),
        key.shift.map(Shift::name).unwrap_or("").to_string(),
    ]
}

fn columns(extra: &[&str]) -> Vec<Column> {
    ["date", "employee", "shift"]
        .iter()
        .chain(extra)
        .map(|h| Column::new(h))
        .collect()
}

impl StatusLogic {
    /// Print the payroll ledger.
    pub fn print_payroll(ledger: &Reconciler, json: bool) -> AppResult<()> {
        let status = ledger.payroll_status()?;
        if json {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }
        if status.is_empty() {
            info("No payroll marks recorded.");
            return Ok(());
        }

        let mut table = Table::new(columns(&["done", "updated_at", "by"]));
        for (key, record) in &status {
            let mut row = key_cells(key);
            row.push(if record.done { "yes" } else { "no" }.to_string());
            row.push(record.updated_at.to_string());
            row.push(record.by.clone());
            table.add_row(row);
        }
        print!("{}", table.render());
        Ok(())
    }

    /// Print the entries edited after their payroll mark.
    pub fn print_dirty(ledger: &Reconciler, json: bool) -> AppResult<()> {
        let dirty = ledger.compute_dirty()?;
        if json {
            println!("{}", serde_json::to_string_pretty(&dirty)?);
            return Ok(());
        }
        if dirty.is_empty() {
            info("No entries changed after payroll processing.");
            return Ok(());
        }

        warning(format!("{} entries changed after payroll processing:", dirty.len()));
        let mut table = Table::new(columns(&["payroll_at", "touched_at", "by"]));
        for (key, entry) in &dirty {
            let mut row = key_cells(key);
            row.push(entry.payroll_at.to_string());
            row.push(entry.touched_at.to_string());
            row.push(entry.by.clone());
            table.add_row(row);
        }
        print!("{}", table.render());
        Ok(())
    }
}
