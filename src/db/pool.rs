//! SQLite connection wrapper for the audit database (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            // a missing directory surfaces as the sqlite open error below
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }
}
