use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reset::ResetLogic;
use crate::db::initialize::open_audit_db;
use crate::errors::AppResult;
use crate::ledger::Reconciler;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reset { yes } = cmd {
        if !*yes {
            warning("Reset clears both ledgers and the audit log. Re-run with --yes to confirm.");
            return Ok(());
        }
        let mut pool = open_audit_db(&cfg.database)?;
        let ledger = Reconciler::open(&expand_tilde(&cfg.data_dir))?;
        ResetLogic::reset(&mut pool, &ledger, &cfg.actor)?;
    }
    Ok(())
}
