use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ledger::{Reconciler, Stamp};
use crate::models::{Entry, EntryKey, load_entries};
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TouchSummary {
    pub recorded: usize,
    /// Entries without a usable date, name or shift.
    pub skipped: usize,
}

pub struct TouchLogic;

fn audit_message(entry: &Entry) -> String {
    format!(
        "employee={} | date={} | shift={} | value={} {}",
        entry.name.as_deref().unwrap_or(""),
        entry.date.as_deref().unwrap_or(""),
        entry.shift.as_deref().unwrap_or(""),
        entry.action.as_deref().unwrap_or(""),
        entry.note.as_deref().unwrap_or("")
    )
    .trim_end()
    .to_string()
}

impl TouchLogic {
    /// Overwrite the touch record of every entry and audit one line each.
    pub fn apply(
        pool: &DbPool,
        ledger: &Reconciler,
        entries: &[Entry],
        actor: &str,
        now: Stamp,
    ) -> AppResult<TouchSummary> {
        let mut touched: Vec<(EntryKey, &Entry)> = Vec::new();
        let mut skipped = 0;
        for entry in entries {
            match entry.touch_key() {
                Some(key) => touched.push((key, entry)),
                None => skipped += 1,
            }
        }

        let recorded = ledger.record_touches(touched.iter().map(|(k, _)| k.clone()), actor, now)?;

        for (key, entry) in &touched {
            audit_or_warn(&pool.conn, "update entry", &key.to_string(), &audit_message(entry));
        }

        Ok(TouchSummary {
            recorded,
            skipped,
        })
    }

    pub fn touch(pool: &mut DbPool, cfg: &Config, entries_path: &Path) -> AppResult<TouchSummary> {
        let entries = load_entries(entries_path)?;
        let ledger = Reconciler::open(&expand_tilde(&cfg.data_dir))?;
        let summary = Self::apply(pool, &ledger, &entries, &cfg.actor, Stamp::now())?;

        success(format!("{} entries touched by {}", summary.recorded, cfg.actor));
        if summary.skipped > 0 {
            warning(format!(
                "{} entries skipped (missing name, invalid date or unknown shift)",
                summary.skipped
            ));
        }
        Ok(summary)
    }
}
