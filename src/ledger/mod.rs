//! Reconciliation ledger: last-touched and payroll-processed records per
//! `date|employee|shift`, and the dirty set derived from them.

mod records;
mod stamp;
mod store;

pub use records::{DirtyEntry, PayrollRecord, TouchRecord};
pub use stamp::{STAMP_FORMAT, Stamp};
pub use store::{JsonStore, Locked};

use crate::errors::AppResult;
use crate::models::EntryKey;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const TOUCH_LOG_FILE: &str = "touch_log.json";
pub const PAYROLL_STATUS_FILE: &str = "payroll_status.json";

/// Both ledgers behind one service. Every operation locks the files it
/// reads or writes and works on their current content, so touch events and
/// payroll imports from separate processes never lose each other's updates.
/// When both ledgers are needed the touch ledger is locked first.
#[derive(Debug)]
pub struct Reconciler {
    touches: JsonStore<TouchRecord>,
    payroll: JsonStore<PayrollRecord>,
}

impl Reconciler {
    /// Use the ledgers stored in `data_dir`, creating the directory.
    pub fn open(data_dir: &Path) -> AppResult<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            touches: JsonStore::new(&data_dir.join(TOUCH_LOG_FILE)),
            payroll: JsonStore::new(&data_dir.join(PAYROLL_STATUS_FILE)),
        })
    }

    /// Unconditional overwrite of the touch record for `key`.
    pub fn record_touch(&self, key: EntryKey, actor: &str, now: Stamp) -> AppResult<()> {
        self.record_touches([key], actor, now).map(|_| ())
    }

    /// Touch several keys with a single write. Returns how many were recorded.
    pub fn record_touches<I>(&self, keys: I, actor: &str, now: Stamp) -> AppResult<usize>
    where
        I: IntoIterator<Item = EntryKey>,
    {
        let mut store = self.touches.lock()?;
        let mut count = 0;
        for key in keys {
            store.entries.insert(
                key,
                TouchRecord {
                    touched_at: now,
                    by: actor.to_string(),
                },
            );
            count += 1;
        }
        store.save()?;
        Ok(count)
    }

    /// Mark `key` as processed unless it already is. An existing mark keeps
    /// its timestamp and actor. Returns whether a new mark was written.
    pub fn record_payroll_if_unset(
        &self,
        key: EntryKey,
        actor: &str,
        now: Stamp,
    ) -> AppResult<bool> {
        Ok(self.record_payroll_marks(&[key], actor, now)? == 1)
    }

    /// [`record_payroll_if_unset`](Self::record_payroll_if_unset) for a batch,
    /// with a single write. Returns the number of new marks.
    pub fn record_payroll_marks(
        &self,
        keys: &[EntryKey],
        actor: &str,
        now: Stamp,
    ) -> AppResult<usize> {
        let mut store = self.payroll.lock()?;
        let mut added = 0;
        for key in keys {
            if store.entries.get(key).is_some_and(|r| r.done) {
                continue;
            }
            store.entries.insert(
                key.clone(),
                PayrollRecord {
                    done: true,
                    updated_at: now,
                    by: actor.to_string(),
                },
            );
            added += 1;
        }
        store.save()?;
        Ok(added)
    }

    pub fn payroll_status(&self) -> AppResult<BTreeMap<EntryKey, PayrollRecord>> {
        Ok(self.payroll.lock()?.entries.clone())
    }

    pub fn payroll_len(&self) -> AppResult<usize> {
        Ok(self.payroll.lock()?.entries.len())
    }

    pub fn touches(&self) -> AppResult<BTreeMap<EntryKey, TouchRecord>> {
        Ok(self.touches.lock()?.entries.clone())
    }

    /// Processed entries touched strictly after their payroll mark.
    /// A processed entry never touched is clean.
    pub fn compute_dirty(&self) -> AppResult<BTreeMap<EntryKey, DirtyEntry>> {
        let touches = self.touches.lock()?;
        let payroll = self.payroll.lock()?;

        Ok(payroll
            .entries
            .iter()
            .filter(|(_, p)| p.done)
            .filter_map(|(key, p)| {
                let t = touches.entries.get(key)?;
                (t.touched_at > p.updated_at).then(|| {
                    (
                        key.clone(),
                        DirtyEntry {
                            payroll_at: p.updated_at,
                            touched_at: t.touched_at,
                            by: t.by.clone(),
                        },
                    )
                })
            })
            .collect())
    }

    /// Wipe both ledgers.
    pub fn reset(&self) -> AppResult<()> {
        let mut touches = self.touches.lock()?;
        let mut payroll = self.payroll.lock()?;
        touches.clear();
        payroll.clear();
        touches.save()?;
        payroll.save()?;
        Ok(())
    }
}
