use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::{AppError, AppResult};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            if path.exists() {
                ConfigLogic::print(&path)?;
            } else {
                // no file yet: show the effective defaults
                let yaml =
                    serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
                println!("📄 Current configuration (defaults):\n");
                println!("{yaml}");
            }
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
        }
    }

    Ok(())
}
