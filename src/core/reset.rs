use crate::db::log::{audit_or_warn, clear_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ledger::Reconciler;
use crate::ui::messages::success;

pub struct ResetLogic;

impl ResetLogic {
    /// Full wipe: both ledgers and the audit trail. The reset itself is
    /// the first line of the new trail.
    pub fn reset(pool: &mut DbPool, ledger: &Reconciler, actor: &str) -> AppResult<()> {
        ledger.reset()?;
        let deleted = clear_log(&pool.conn)?;

        audit_or_warn(&pool.conn, "reset", "system", &format!("by={actor}"));
        success(format!("Ledgers cleared, {deleted} audit lines removed."));
        Ok(())
    }
}
