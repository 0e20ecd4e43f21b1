use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_audit_db;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{detail, success};
use crate::utils::path::expand_tilde;
use std::fs;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (file skipped in test mode)
///  - the ledger directory
///  - the audit database and its migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut written = Config::init_all(cli.db.clone(), cli.test)?;
    // overrides given on this command line win over the stored file
    written.data_dir = cfg.data_dir.clone();
    written.template = cfg.template.clone();

    let data_dir = expand_tilde(&written.data_dir);
    fs::create_dir_all(&data_dir)?;

    let pool = open_audit_db(&written.database)?;

    println!("⚙️  Initializing shiftledger…");
    if !cli.test {
        detail("config", Config::config_file().display());
    }
    detail("database", &written.database);
    detail("data dir", data_dir.display());
    detail("template", &written.template);

    log::audit_or_warn(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", &written.database),
    );

    success("shiftledger initialization completed!");
    Ok(())
}
