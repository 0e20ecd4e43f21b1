use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status::StatusLogic;
use crate::errors::AppResult;
use crate::ledger::Reconciler;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dirty { json } = cmd {
        let ledger = Reconciler::open(&expand_tilde(&cfg.data_dir))?;
        StatusLogic::print_dirty(&ledger, *json)?;
    }
    Ok(())
}
