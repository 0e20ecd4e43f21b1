use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::matrix::{DateRange, ProjectionReport, parse_template, project, rebuild};
use crate::models::{Entry, load_entries};
use crate::sheet::{Sheet, read_xlsx, write_xlsx};
use crate::ui::messages::{detail, success, warning};
use crate::utils::fs::ensure_writable;
use crate::utils::path::expand_tilde;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Lay out `range` on a copy of `template` and project `entries` into it.
    ///
    /// The roster is read before the dynamic region is rebuilt: rebuilding
    /// dissolves the wide team merges the parser recognises teams by.
    pub fn build_report(
        template: &Sheet,
        default_team: &str,
        entries: &[Entry],
        range: DateRange,
    ) -> AppResult<(Sheet, ProjectionReport)> {
        if entries.is_empty() {
            return Err(AppError::NoEntries);
        }

        let roster = parse_template(template, default_team);
        let mut sheet = template.clone();
        rebuild(&mut sheet, range);
        let report = project(&mut sheet, &roster, entries, range);

        Ok((sheet, report))
    }

    /// Export the entries of `entries_path` for `from..=to` into `out`.
    /// Range and entries are validated before anything is written.
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        from: &str,
        to: &str,
        entries_path: &Path,
        out: &Path,
        force: bool,
    ) -> AppResult<ProjectionReport> {
        let range = DateRange::parse(from, to)?;
        let entries = load_entries(entries_path)?;
        if entries.is_empty() {
            return Err(AppError::NoEntries);
        }

        ensure_writable(out, force)?;

        let template = read_xlsx(&expand_tilde(&cfg.template))?;
        let (sheet, report) = Self::build_report(&template, &cfg.default_team, &entries, range)?;
        write_xlsx(&sheet, out)?;

        audit_or_warn(
            &pool.conn,
            "export",
            &out.display().to_string(),
            &format!(
                "range={}..{} placed={} dropped={}",
                range.start(),
                range.end(),
                report.placed,
                report.dropped
            ),
        );

        success(format!("Matrix exported to {}", out.display()));
        detail("range", format!("{} → {} ({} days)", range.start(), range.end(), range.days()));
        detail("placed", report.placed);
        if report.dropped > 0 {
            warning(format!(
                "{} entries dropped (unknown employee, shift or date outside the range)",
                report.dropped
            ));
        }

        Ok(report)
    }
}
