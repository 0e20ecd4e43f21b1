use crate::errors::AppResult;
use crate::models::EntryKey;
use crate::ui::messages::warning;
use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A keyed JSON file shared between processes.
///
/// Every access goes through [`JsonStore::lock`], which takes an exclusive
/// lock on a sibling `.lock` file and reads the current file content, so
/// concurrent writers never save over each other's records.
#[derive(Debug)]
pub struct JsonStore<V> {
    path: PathBuf,
    lock_path: PathBuf,
    _records: PhantomData<V>,
}

/// Content of a [`JsonStore`] while its lock is held.
/// The lock is released when the value is dropped.
pub struct Locked<'a, V> {
    store: &'a JsonStore<V>,
    _lock: File,
    pub entries: BTreeMap<EntryKey, V>,
    /// Records whose key or value does not parse, written back untouched.
    unparsed: Map<String, Value>,
}

impl<V: Serialize + DeserializeOwned> JsonStore<V> {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lock_path: path.with_extension("json.lock"),
            _records: PhantomData,
        }
    }

    /// Wait for the exclusive lock and load the file.
    pub fn lock(&self) -> AppResult<Locked<'_, V>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        lock.lock_exclusive()?;

        let (entries, unparsed) = self.load()?;
        Ok(Locked {
            store: self,
            _lock: lock,
            entries,
            unparsed,
        })
    }

    /// Read the records, skipping the ones that do not parse. A file that is
    /// not a JSON object at all is copied aside and read as empty.
    fn load(&self) -> AppResult<(BTreeMap<EntryKey, V>, Map<String, Value>)> {
        let mut entries = BTreeMap::new();
        let mut unparsed = Map::new();

        let content = match fs::read_to_string(&self.path) {
            Ok(content) if !content.trim().is_empty() => content,
            _ => return Ok((entries, unparsed)),
        };

        let raw: Map<String, Value> = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                let backup = self.path.with_extension("json.bak");
                fs::copy(&self.path, &backup)?;
                warning(format!(
                    "Ledger '{}' is unreadable ({e}), starting empty. Previous content kept in '{}'.",
                    self.path.display(),
                    backup.display()
                ));
                return Ok((entries, unparsed));
            }
        };

        for (raw_key, value) in raw {
            let parsed = raw_key
                .parse::<EntryKey>()
                .and_then(|key| {
                    V::deserialize(&value)
                        .map(|v| (key, v))
                        .map_err(|e| e.to_string())
                });
            match parsed {
                Ok((key, record)) => {
                    entries.insert(key, record);
                }
                Err(e) => {
                    warning(format!(
                        "Ledger '{}': skipping record '{raw_key}' ({e})",
                        self.path.display()
                    ));
                    unparsed.insert(raw_key, value);
                }
            }
        }

        Ok((entries, unparsed))
    }
}

impl<V: Serialize> Locked<'_, V> {
    /// Write the records back, replacing the file atomically.
    /// Unparsed records are kept unless a parsed record now renders to the same key.
    pub fn save(&self) -> AppResult<()> {
        let mut out = self.unparsed.clone();
        for (key, record) in &self.entries {
            out.insert(key.to_string(), serde_json::to_value(record)?);
        }

        let json = serde_json::to_string_pretty(&out)?;
        let tmp = self.store.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.store.path)?;
        Ok(())
    }

    /// Drop every record, including the unparsed ones.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.unparsed.clear();
    }
}
