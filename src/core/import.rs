use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ledger::{Reconciler, Stamp};
use crate::matrix::scan_payroll_marks;
use crate::sheet::{Sheet, read_xlsx};
use crate::ui::messages::{detail, success};
use crate::utils::path::expand_tilde;
use serde::Serialize;
use std::path::Path;

/// Outcome of a payroll import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Keys newly marked as processed by this import.
    pub updated_count: usize,
    /// Keys in the payroll ledger after the import.
    pub total_keys: usize,
    pub scanned_cells: usize,
    pub marked_cells: usize,
    pub meta_columns: usize,
}

pub struct ImportLogic;

impl ImportLogic {
    /// Record every payroll mark found on `sheet`. Marks already in the
    /// ledger keep their original timestamp and actor. A sheet without
    /// recognisable headers is rejected before the ledger is touched.
    pub fn apply(
        sheet: &Sheet,
        ledger: &Reconciler,
        actor: &str,
        now: Stamp,
    ) -> AppResult<ImportSummary> {
        let scan = scan_payroll_marks(sheet)?;
        let updated_count = ledger.record_payroll_marks(&scan.marked, actor, now)?;

        Ok(ImportSummary {
            updated_count,
            total_keys: ledger.payroll_len()?,
            scanned_cells: scan.scanned_cells,
            marked_cells: scan.marked_cells,
            meta_columns: scan.meta_columns,
        })
    }

    pub fn import(pool: &mut DbPool, cfg: &Config, file: &Path) -> AppResult<ImportSummary> {
        let sheet = read_xlsx(file)?;
        let ledger = Reconciler::open(&expand_tilde(&cfg.data_dir))?;
        let summary = Self::apply(&sheet, &ledger, &cfg.actor, Stamp::now())?;

        audit_or_warn(
            &pool.conn,
            "upload payroll",
            &file.display().to_string(),
            &format!("updated={}", summary.updated_count),
        );

        success(format!("Payroll file imported: {}", file.display()));
        detail("updated_count", summary.updated_count);
        detail("total_keys", summary.total_keys);
        detail("scanned_cells", summary.scanned_cells);
        detail("marked_cells", summary.marked_cells);
        detail("meta_columns", summary.meta_columns);

        Ok(summary)
    }
}
