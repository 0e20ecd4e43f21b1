use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::initialize::open_audit_db;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        from,
        to,
        entries,
        file,
        force,
    } = cmd
    {
        let mut pool = open_audit_db(&cfg.database)?;
        ExportLogic::export(&mut pool, cfg, from, to, entries, file, *force)?;
    }
    Ok(())
}
