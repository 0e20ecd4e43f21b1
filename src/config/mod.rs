use crate::errors::{AppError, AppResult};
use crate::matrix::layout::DEFAULT_TEAM;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding the audit log.
    pub database: String,
    /// Directory of the touch and payroll ledgers.
    pub data_dir: String,
    /// Roster template used by `export` and `teams`.
    pub template: String,
    /// Display name of employees listed before any team header.
    pub default_team: String,
    /// Name recorded in the ledgers and the audit log.
    pub actor: String,
}

fn default_actor() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "admin".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            data_dir: Self::data_dir().to_string_lossy().to_string(),
            template: Self::template_file().to_string_lossy().to_string(),
            default_team: DEFAULT_TEAM.to_string(),
            actor: default_actor(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shiftledger")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".shiftledger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftledger.conf")
    }

    /// Return the full path of the audit database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftledger.sqlite")
    }

    pub fn data_dir() -> PathBuf {
        Self::config_dir().join("data")
    }

    pub fn template_file() -> PathBuf {
        Self::config_dir().join("roster_template.xlsx")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Create the config directory and the config file.
    /// In test mode the file is not written.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Self::load()?;

        // DB name: user provided or default
        if let Some(name) = custom_db {
            let p = Path::new(&name);
            config.database = if p.is_absolute() {
                p.to_string_lossy().to_string()
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
