// File: ./src/storage.rs
// Local copy of the event list pulled from the dashboard API.
//
// VERSION BUMP REQUIRED:
// Changes to TimelineEvent serialization require incrementing
// EVENT_STORAGE_VERSION below and adding a migration arm.
use crate::context::AppContext;
use crate::model::TimelineEvent;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v0: bare JSON array of events (raw API dump)
// - v1: versioned wrapper
const EVENT_STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct EventStorageData {
    #[serde(default)]
    version: u32,
    events: Vec<TimelineEvent>,
}

/// Outcome of merging incoming events into the stored list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub updated: usize,
}

pub struct EventStorage;

impl EventStorage {
    pub fn load(ctx: &dyn AppContext) -> Result<Vec<TimelineEvent>> {
        let path = ctx.get_events_path()?;
        Self::load_from_path(&path)
    }

    pub fn save(ctx: &dyn AppContext, events: &[TimelineEvent]) -> Result<()> {
        let path = ctx.get_events_path()?;
        Self::save_to_path(&path, events)
    }

    /// Load, mutate and write back the stored events under a single lock.
    ///
    /// Concurrent callers are serialized by the sidecar lock, so no caller can
    /// overwrite a change made between its own read and write.
    pub fn modify<F, T>(ctx: &dyn AppContext, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<TimelineEvent>) -> T,
    {
        let path = ctx.get_events_path()?;
        Self::with_lock(&path, || {
            let mut events = Self::read_unlocked(&path)?;
            let out = f(&mut events);
            Self::write_versioned(&path, &events)?;
            Ok(out)
        })
    }

    /// Merges a JSON array of events (as returned by the API) into the store.
    /// Events whose id already exists replace the stored copy in place; the
    /// rest are appended in file order.
    pub fn import_from_json(ctx: &dyn AppContext, json: &str) -> Result<ImportReport> {
        let incoming = Self::parse_events(json)?;
        if incoming.is_empty() {
            anyhow::bail!("No events found in import data");
        }

        let report = Self::modify(ctx, |events| {
            let (merged, report) = merge_events(std::mem::take(events), incoming);
            *events = merged;
            report
        })?;

        log::info!(
            "Imported events: {} added, {} updated",
            report.added,
            report.updated
        );
        Ok(report)
    }

    /// Accepts either a bare array or the versioned wrapper.
    pub fn parse_events(json: &str) -> Result<Vec<TimelineEvent>> {
        if let Ok(data) = serde_json::from_str::<EventStorageData>(json) {
            return Ok(data.events);
        }
        let events: Vec<TimelineEvent> =
            serde_json::from_str(json).context("Failed to parse event list")?;
        Ok(events)
    }

    fn load_from_path(path: &Path) -> Result<Vec<TimelineEvent>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(path, || Self::read_unlocked(path))
    }

    /// Reads and, if needed, upgrades the file. Caller must hold the lock.
    fn read_unlocked(path: &Path) -> Result<Vec<TimelineEvent>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let (events, needs_upgrade) =
            if let Ok(data) = serde_json::from_str::<EventStorageData>(&json) {
                if data.version > EVENT_STORAGE_VERSION {
                    return Err(anyhow::anyhow!(
                        "Event storage version {} is newer than supported version {}",
                        data.version,
                        EVENT_STORAGE_VERSION
                    ));
                }
                let upgrade = data.version != EVENT_STORAGE_VERSION;
                (data.events, upgrade)
            } else {
                log::info!(
                    "Migrating {} from v0 to v{}",
                    path.display(),
                    EVENT_STORAGE_VERSION
                );
                let events: Vec<TimelineEvent> = serde_json::from_str(&json)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                (events, true)
            };

        if needs_upgrade {
            Self::write_versioned(path, &events)?;
        }
        Ok(events)
    }

    fn save_to_path(path: &Path, events: &[TimelineEvent]) -> Result<()> {
        Self::with_lock(path, || Self::write_versioned(path, events))
    }

    fn write_versioned(path: &Path, events: &[TimelineEvent]) -> Result<()> {
        let data = EventStorageData {
            version: EVENT_STORAGE_VERSION,
            events: events.to_vec(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        Self::atomic_write(path, json)
    }

    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on a sidecar `.lock` file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

/// Replaces events by id and appends unknown ones. Neither list is reordered.
pub fn merge_events(
    existing: Vec<TimelineEvent>,
    incoming: Vec<TimelineEvent>,
) -> (Vec<TimelineEvent>, ImportReport) {
    let mut merged = existing;
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.clone(), i))
        .collect();
    let mut report = ImportReport::default();

    for event in incoming {
        if let Some(&idx) = index.get(&event.id) {
            merged[idx] = event;
            report.updated += 1;
        } else {
            index.insert(event.id.clone(), merged.len());
            merged.push(event);
            report.added += 1;
        }
    }
    (merged, report)
}
