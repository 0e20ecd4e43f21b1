use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::initialize::open_audit_db;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let mut pool = open_audit_db(&cfg.database)?;
        ImportLogic::import(&mut pool, cfg, file)?;
    }
    Ok(())
}
