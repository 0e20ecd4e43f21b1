use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::touch::TouchLogic;
use crate::db::initialize::open_audit_db;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Touch { entries } = cmd {
        let mut pool = open_audit_db(&cfg.database)?;
        TouchLogic::touch(&mut pool, cfg, entries)?;
    }
    Ok(())
}
